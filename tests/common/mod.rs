//! Scripted node client shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ethers::types::U256;
use gas_engine::{CallIntent, FeeHistorySample, NodeClient, NodeClientError};
use std::time::Duration;

/// A [`NodeClient`] whose responses are fixed up-front. Optional per-query
/// delays let tests exercise cancellation and deadlines mid-flight.
#[derive(Debug, Clone)]
pub struct MockNodeClient {
    pub gas_price: Result<U256, NodeClientError>,
    pub base_fee: Result<Option<U256>, NodeClientError>,
    pub history: Result<Vec<FeeHistorySample>, NodeClientError>,
    pub estimate: Result<U256, NodeClientError>,
    pub history_delay: Option<Duration>,
    pub base_fee_delay: Option<Duration>,
}

impl MockNodeClient {
    /// EIP-1559 chain with a flat history window: every block carries
    /// `base_fee` and the same `rewards` row.
    pub fn dynamic_chain(base_fee: u64, rewards: &[u64], blocks: usize) -> Self {
        let sample = FeeHistorySample::new(
            U256::from(base_fee),
            rewards.iter().map(|&r| U256::from(r)).collect(),
        );
        Self {
            gas_price: Err(rpc_err("eth_gasPrice disabled in mock")),
            base_fee: Ok(Some(U256::from(base_fee))),
            history: Ok(vec![sample; blocks]),
            estimate: Ok(U256::from(21_000u64)),
            history_delay: None,
            base_fee_delay: None,
        }
    }

    /// Pre-1559 chain: no fee history, a single suggested gas price.
    pub fn legacy_chain(gas_price: u64) -> Self {
        Self {
            gas_price: Ok(U256::from(gas_price)),
            base_fee: Ok(None),
            history: Err(rpc_err("the method eth_feeHistory does not exist")),
            estimate: Ok(U256::from(21_000u64)),
            history_delay: None,
            base_fee_delay: None,
        }
    }

    /// Node where every fee query fails.
    pub fn unavailable() -> Self {
        Self {
            gas_price: Err(transport_err("connection refused")),
            base_fee: Err(transport_err("connection refused")),
            history: Err(transport_err("connection refused")),
            estimate: Err(transport_err("connection refused")),
            history_delay: None,
            base_fee_delay: None,
        }
    }

    pub fn with_history(mut self, samples: Vec<FeeHistorySample>) -> Self {
        self.history = Ok(samples);
        self
    }

    pub fn with_estimate(mut self, estimate: Result<U256, NodeClientError>) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn with_base_fee_delay(mut self, delay: Duration) -> Self {
        self.base_fee_delay = Some(delay);
        self
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn gas_price(&self) -> Result<U256, NodeClientError> {
        self.gas_price.clone()
    }

    async fn latest_base_fee(&self) -> Result<Option<U256>, NodeClientError> {
        pause(self.base_fee_delay).await;
        self.base_fee.clone()
    }

    async fn fee_history(
        &self,
        _block_count: u64,
        _percentiles: &[f64],
    ) -> Result<Vec<FeeHistorySample>, NodeClientError> {
        pause(self.history_delay).await;
        self.history.clone()
    }

    async fn estimate_gas(&self, _intent: &CallIntent) -> Result<U256, NodeClientError> {
        self.estimate.clone()
    }
}

pub fn sample(base_fee: u64, rewards: &[u64]) -> FeeHistorySample {
    FeeHistorySample::new(
        U256::from(base_fee),
        rewards.iter().map(|&r| U256::from(r)).collect(),
    )
}

pub fn rpc_err(reason: &str) -> NodeClientError {
    NodeClientError::Rpc {
        reason: reason.to_string(),
    }
}

pub fn transport_err(reason: &str) -> NodeClientError {
    NodeClientError::Transport {
        reason: reason.to_string(),
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(d) = delay {
        tokio::time::sleep(d).await;
    }
}
