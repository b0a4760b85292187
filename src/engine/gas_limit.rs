//! Gas-limit estimation.
//!
//! Simulation can under-count gas-sensitive code paths and calls on the
//! margin of available balance, so a multiplicative safety margin is
//! applied and rounded up. A reverting simulation surfaces as
//! [`GasError::SimulationReverted`] instead of a fabricated default.

use crate::config::EngineConfig;
use crate::engine::{mul_percent_ceil, with_context};
use crate::error::{GasError, Stage};
use crate::traits::{NodeClient, NodeClientError};
use crate::types::CallIntent;
use ethers::types::U256;
use tokio_util::sync::CancellationToken;

pub(crate) async fn estimate<C: NodeClient>(
    client: &C,
    config: &EngineConfig,
    intent: &CallIntent,
    token: &CancellationToken,
) -> Result<U256, GasError> {
    let raw = with_context(
        Stage::LimitEstimation,
        config.call_timeout(),
        token,
        client.estimate_gas(intent),
    )
    .await?;

    if raw.is_zero() {
        return Err(GasError::Node {
            stage: Stage::LimitEstimation,
            source: NodeClientError::InvalidResponse {
                reason: "zero gas estimate".to_string(),
            },
        });
    }

    mul_percent_ceil(raw, config.gas_limit_margin_percent()).ok_or_else(|| GasError::Node {
        stage: Stage::LimitEstimation,
        source: NodeClientError::InvalidResponse {
            reason: format!("gas estimate {raw} overflows the safety margin"),
        },
    })
}
