//! Suggestion pipeline: detect the fee model, track fees, estimate the gas
//! limit, and assemble one consistent [`GasSuggestion`].
//!
//! Each request is self-contained; no component retains state between
//! requests beyond the injected node client's own connection.

use crate::config::EngineConfig;
use crate::error::{GasError, Stage};
use crate::traits::{NodeClient, NodeClientError};
use crate::types::{CallIntent, GasSuggestion, UrgencyTier};
use ethers::types::U256;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub(crate) mod assembler;
pub(crate) mod base_fee;
pub(crate) mod detector;
pub(crate) mod gas_limit;
pub(crate) mod priority;

/// Gas-fee parameter suggestion engine over an injected node client.
#[derive(Debug)]
pub struct GasEngine<C> {
    client: C,
    config: EngineConfig,
}

impl<C: NodeClient> GasEngine<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(client: C, config: EngineConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Suggest fee parameters and a gas limit for `intent` at the requested
    /// urgency tier.
    ///
    /// The caller's `token` cancels the whole request; any in-flight node
    /// query aborts with [`GasError::Cancelled`] and no partial result is
    /// returned. Per-call deadlines come from the engine config and expire
    /// as [`GasError::Timeout`]. No retries happen here; transient node
    /// errors propagate so the caller's retry policy sees fresh fee data.
    pub async fn suggest(
        &self,
        intent: &CallIntent,
        tier: UrgencyTier,
        token: &CancellationToken,
    ) -> Result<GasSuggestion, GasError> {
        let policy = *self
            .config
            .tier_policy(tier)
            .ok_or_else(|| GasError::InvalidTier {
                value: tier.to_string(),
            })?;

        let detected = detector::detect(&self.client, &self.config, token).await?;
        debug!(model = ?detected.model(), %tier, "fee model detected");

        // Independent queries, issued concurrently.
        let (tracked, gas_limit) = tokio::try_join!(
            base_fee::track(&self.client, &self.config, &detected, token),
            gas_limit::estimate(&self.client, &self.config, intent, token),
        )?;

        let priority = priority::estimate(&detected, tier, &policy, &self.config)?;
        debug!(%priority, %gas_limit, "fee figures collected");

        let suggestion = assembler::assemble(&tracked, priority, gas_limit, &self.config)?;
        debug!(params = %suggestion.params, "suggestion assembled");
        Ok(suggestion)
    }
}

/// Run one node query under the caller's cancellation token and the
/// configured per-call deadline. Cancellation wins ties so a pre-cancelled
/// request never reaches the network.
pub(crate) async fn with_context<T, F>(
    stage: Stage,
    timeout: Duration,
    token: &CancellationToken,
    fut: F,
) -> Result<T, GasError>
where
    F: Future<Output = Result<T, NodeClientError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(GasError::Cancelled { stage }),
        res = tokio::time::timeout(timeout, fut) => match res {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(wrap_node_error(stage, source)),
            Err(_) => Err(GasError::Timeout { stage }),
        },
    }
}

fn wrap_node_error(stage: Stage, source: NodeClientError) -> GasError {
    match source {
        // Execution failures only mean "the call would revert" when we were
        // simulating the call. Elsewhere they are ordinary node errors.
        NodeClientError::Execution { reason } if stage == Stage::LimitEstimation => {
            GasError::SimulationReverted { reason }
        }
        source => GasError::Node { stage, source },
    }
}

/// `value * percent / 100`, rounded up. Strictly greater than `value` for
/// any non-zero `value` once `percent > 100`. `None` when the scaled value
/// overflows, which only a corrupt or hostile node input can produce.
pub(crate) fn mul_percent_ceil(value: U256, percent: u64) -> Option<U256> {
    value
        .checked_mul(U256::from(percent))?
        .checked_add(U256::from(99u64))
        .map(|scaled| scaled / U256::from(100u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_percent_ceil_rounds_up() {
        assert_eq!(
            mul_percent_ceil(U256::from(21_000u64), 120),
            Some(U256::from(25_200u64))
        );
        // 1 * 1.2 rounds up to 2
        assert_eq!(mul_percent_ceil(U256::from(1u64), 120), Some(U256::from(2u64)));
        // identity at 100 percent
        assert_eq!(
            mul_percent_ceil(U256::from(33u64), 100),
            Some(U256::from(33u64))
        );
    }

    #[test]
    fn test_mul_percent_ceil_strictly_above_input() {
        for raw in [1u64, 5, 99, 21_000, 1_000_000] {
            let value = U256::from(raw);
            assert!(mul_percent_ceil(value, 101).unwrap() > value);
        }
    }

    #[test]
    fn test_mul_percent_ceil_overflow_is_none() {
        assert_eq!(mul_percent_ceil(U256::max_value(), 120), None);
        assert_eq!(mul_percent_ceil(U256::max_value(), 101), None);
    }

    #[test]
    fn test_execution_error_maps_by_stage() {
        let exec = || NodeClientError::Execution {
            reason: "execution reverted".to_string(),
        };
        assert!(matches!(
            wrap_node_error(Stage::LimitEstimation, exec()),
            GasError::SimulationReverted { .. }
        ));
        assert!(matches!(
            wrap_node_error(Stage::Detection, exec()),
            GasError::Node {
                stage: Stage::Detection,
                source: NodeClientError::Execution { .. },
            }
        ));
    }
}
