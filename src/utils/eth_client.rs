//! Ethers-backed [`NodeClient`] adapter.
//!
//! Wraps an `ethers` HTTP provider and translates its responses and errors
//! into the engine's capability types. Error classification is message
//! based; ethers flattens JSON-RPC failures into strings at this layer.

use crate::traits::{NodeClient, NodeClientError};
use crate::types::{CallIntent, FeeHistorySample};
use async_trait::async_trait;
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use std::sync::Arc;

/// [`NodeClient`] over `Provider<Http>`.
#[derive(Debug, Clone)]
pub struct EthersNodeClient {
    provider: Arc<Provider<Http>>,
}

impl EthersNodeClient {
    pub fn new(provider: Arc<Provider<Http>>) -> Self {
        Self { provider }
    }

    /// Connect to an HTTP RPC endpoint.
    pub fn connect(url: &str) -> Result<Self, NodeClientError> {
        let provider = Provider::<Http>::try_from(url).map_err(|e| NodeClientError::Transport {
            reason: e.to_string(),
        })?;
        Ok(Self::new(Arc::new(provider)))
    }

    pub fn provider(&self) -> &Arc<Provider<Http>> {
        &self.provider
    }
}

#[async_trait]
impl NodeClient for EthersNodeClient {
    async fn gas_price(&self) -> Result<U256, NodeClientError> {
        self.provider.get_gas_price().await.map_err(classify)
    }

    async fn latest_base_fee(&self) -> Result<Option<U256>, NodeClientError> {
        let block = self
            .provider
            .get_block(BlockNumber::Latest)
            .await
            .map_err(classify)?;
        Ok(block.and_then(|b| b.base_fee_per_gas))
    }

    async fn fee_history(
        &self,
        block_count: u64,
        percentiles: &[f64],
    ) -> Result<Vec<FeeHistorySample>, NodeClientError> {
        let history = self
            .provider
            .fee_history(block_count, BlockNumber::Latest, percentiles)
            .await
            .map_err(classify)?;

        // base_fee_per_gas carries one extra trailing entry for the next
        // block; zip against rewards to keep one sample per historical
        // block, oldest first.
        let samples = history
            .reward
            .iter()
            .zip(history.base_fee_per_gas.iter())
            .map(|(rewards, base_fee)| FeeHistorySample::new(*base_fee, rewards.clone()))
            .collect();
        Ok(samples)
    }

    async fn estimate_gas(&self, intent: &CallIntent) -> Result<U256, NodeClientError> {
        let mut tx = TransactionRequest::new()
            .from(intent.from)
            .value(intent.value)
            .data(intent.data.clone());
        if let Some(to) = intent.to {
            tx = tx.to(to);
        }

        let tx: TypedTransaction = tx.into();
        self.provider.estimate_gas(&tx, None).await.map_err(classify)
    }
}

/// Map a provider error onto the capability taxonomy. Reverts come back as
/// JSON-RPC errors whose message names the execution failure.
fn classify(error: ProviderError) -> NodeClientError {
    let reason = error.to_string();
    let lowered = reason.to_lowercase();

    let execution_patterns = [
        "execution reverted",
        "revert",
        "insufficient funds",
        "gas required exceeds allowance",
        "always failing transaction",
    ];
    if execution_patterns.iter().any(|p| lowered.contains(p)) {
        return NodeClientError::Execution { reason };
    }

    match error {
        ProviderError::JsonRpcClientError(_) => {
            let transport_patterns = ["connection", "timeout", "timed out", "dns", "tls"];
            if transport_patterns.iter().any(|p| lowered.contains(p)) {
                NodeClientError::Transport { reason }
            } else {
                NodeClientError::Rpc { reason }
            }
        }
        ProviderError::SerdeJson(_) | ProviderError::HexError(_) => {
            NodeClientError::InvalidResponse { reason }
        }
        _ => NodeClientError::Rpc { reason },
    }
}
