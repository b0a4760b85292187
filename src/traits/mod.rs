//! Node-client capability boundary.
//!
//! The engine depends on "supply current fee data and simulate calls" as an
//! injected capability, so it stays testable against a fake implementation
//! without any real network. The shipped adapter over an ethers provider
//! lives in [`crate::utils::eth_client`].

use crate::types::{CallIntent, FeeHistorySample};
use async_trait::async_trait;
use ethers::types::U256;
use thiserror::Error;

/// Failures a node client can report. Distinguishes execution-level
/// rejection (the call itself fails) from transport/RPC trouble.
#[derive(Error, Debug, Clone)]
pub enum NodeClientError {
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    #[error("rpc error: {reason}")]
    Rpc { reason: String },

    #[error("execution failed: {reason}")]
    Execution { reason: String },

    #[error("invalid node response: {reason}")]
    InvalidResponse { reason: String },
}

impl NodeClientError {
    /// True when the node rejected the call itself rather than the query.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, NodeClientError::Execution { .. })
    }
}

/// Read-only fee-market access to a chain node.
///
/// Every method is a blocking network operation from the engine's point of
/// view; the engine layers cancellation and deadlines on top, so
/// implementations only need to await the underlying RPC. The engine never
/// assumes the connection is safe for unsynchronized concurrent use beyond
/// what the implementation itself guarantees.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Current suggested gas price for legacy-model chains.
    async fn gas_price(&self) -> Result<U256, NodeClientError>;

    /// Base fee of the latest block, or `None` when the chain does not
    /// expose one.
    async fn latest_base_fee(&self) -> Result<Option<U256>, NodeClientError>;

    /// Per-block base fees and priority-fee percentiles for the most recent
    /// `block_count` blocks, ordered most-recent-last. `percentiles` are
    /// values in `0.0..=100.0`; each sample's `rewards[i]` corresponds to
    /// `percentiles[i]`.
    async fn fee_history(
        &self,
        block_count: u64,
        percentiles: &[f64],
    ) -> Result<Vec<FeeHistorySample>, NodeClientError>;

    /// Simulate the call against current chain state and return the
    /// estimated gas. A revert surfaces as [`NodeClientError::Execution`].
    async fn estimate_gas(&self, intent: &CallIntent) -> Result<U256, NodeClientError>;
}
