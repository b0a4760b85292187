//! Fee-model detection.
//!
//! Probes the dynamic fee-history endpoint first; a well-formed window
//! classifies the chain as dynamic and is carried forward so the priority
//! estimator works on the same data. Otherwise the legacy gas-price probe
//! decides. Both probes failing means the node is unusable.

use crate::config::EngineConfig;
use crate::engine::with_context;
use crate::error::{GasError, Stage};
use crate::traits::NodeClient;
use crate::types::{FeeHistorySample, FeeModel};
use ethers::types::U256;
use tracing::debug;

/// Detection outcome, carrying the intermediate data the rest of the
/// pipeline needs for the detected branch.
#[derive(Debug, Clone)]
pub(crate) enum DetectedModel {
    Legacy { gas_price: U256 },
    Dynamic { samples: Vec<FeeHistorySample> },
}

impl DetectedModel {
    pub(crate) fn model(&self) -> FeeModel {
        match self {
            DetectedModel::Legacy { .. } => FeeModel::Legacy,
            DetectedModel::Dynamic { .. } => FeeModel::Dynamic,
        }
    }
}

/// Request-scoped detection; no chain registry is kept, so a chain that
/// upgrades its fee model is reclassified on the next call.
pub(crate) async fn detect<C: NodeClient>(
    client: &C,
    config: &EngineConfig,
    token: &tokio_util::sync::CancellationToken,
) -> Result<DetectedModel, GasError> {
    let percentiles = config.reward_percentiles();
    let history = with_context(
        Stage::Detection,
        config.call_timeout(),
        token,
        client.fee_history(config.history_blocks(), &percentiles),
    )
    .await;

    match history {
        Ok(samples) if is_dynamic(&samples) => {
            return Ok(DetectedModel::Dynamic { samples });
        }
        Ok(_) => {
            debug!("fee history empty or zeroed, probing legacy gas price");
        }
        Err(GasError::Node { source, .. }) => {
            debug!(error = %source, "fee history unavailable, probing legacy gas price");
        }
        // Cancellation and deadline abort the whole request.
        Err(e) => return Err(e),
    }

    match with_context(
        Stage::Detection,
        config.call_timeout(),
        token,
        client.gas_price(),
    )
    .await
    {
        Ok(gas_price) => Ok(DetectedModel::Legacy { gas_price }),
        Err(GasError::Node { source, .. }) => Err(GasError::NodeUnavailable {
            reason: source.to_string(),
        }),
        Err(e) => Err(e),
    }
}

/// A window is dynamic when it is non-empty and at least one block carries
/// a non-zero base fee. Consistently zeroed base fees are what pre-1559
/// nodes answer when they stub the endpoint.
fn is_dynamic(samples: &[FeeHistorySample]) -> bool {
    !samples.is_empty() && samples.iter().any(|s| !s.base_fee.is_zero())
}
