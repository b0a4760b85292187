//! Base-fee tracking.
//!
//! Legacy chains already surfaced their gas price during detection, so no
//! further query is needed. Dynamic chains fetch the latest block's base
//! fee; the detection window's historical base fees feed trend-aware
//! margin sizing in the assembler.

use crate::config::EngineConfig;
use crate::engine::detector::DetectedModel;
use crate::engine::with_context;
use crate::error::{GasError, Stage};
use crate::traits::NodeClient;
use ethers::types::U256;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Tracked fee figures for the detected model.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TrackedFees {
    Legacy {
        gas_price: U256,
    },
    Dynamic {
        base_fee: U256,
        /// Base fees rising across the window; widens the fee-cap margin.
        rising: bool,
    },
}

pub(crate) async fn track<C: NodeClient>(
    client: &C,
    config: &EngineConfig,
    detected: &DetectedModel,
    token: &CancellationToken,
) -> Result<TrackedFees, GasError> {
    match detected {
        DetectedModel::Legacy { gas_price } => Ok(TrackedFees::Legacy {
            gas_price: *gas_price,
        }),
        DetectedModel::Dynamic { samples } => {
            let latest = with_context(
                Stage::BaseFee,
                config.call_timeout(),
                token,
                client.latest_base_fee(),
            )
            .await?;

            let base_fee = match latest {
                Some(fee) if !fee.is_zero() => fee,
                _ => {
                    // Detection guarantees at least one non-zero base fee
                    // in the window.
                    debug!("latest block carries no base fee, using newest window sample");
                    samples
                        .iter()
                        .rev()
                        .map(|s| s.base_fee)
                        .find(|fee| !fee.is_zero())
                        .ok_or_else(|| GasError::InternalInvariantViolation {
                            detail: "dynamic window with no usable base fee".to_string(),
                        })?
                }
            };

            let rising = match (samples.first(), samples.last()) {
                (Some(oldest), Some(newest)) => newest.base_fee > oldest.base_fee,
                _ => false,
            };

            Ok(TrackedFees::Dynamic { base_fee, rising })
        }
    }
}
