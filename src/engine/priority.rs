//! Priority-fee estimation: map an urgency tier to a concrete fee figure.
//!
//! Dynamic chains take a tier percentile of the pooled fee-history rewards;
//! a degenerate window falls back to a fixed minimum tip scaled by tier
//! ordinal so the engine never suggests a zero tip the network may never
//! include. Legacy chains scale the tracked gas price by the tier
//! multiplier, floored at the tracked price.

use crate::config::{EngineConfig, TierPolicy};
use crate::engine::detector::DetectedModel;
use crate::error::GasError;
use crate::types::UrgencyTier;
use ethers::types::U256;
use tracing::warn;

/// Pure given the detection outcome; issues no node queries of its own.
/// A node-reported price so large the tier multiplier overflows is past
/// any ceiling and is rejected as unreasonable.
pub(crate) fn estimate(
    detected: &DetectedModel,
    tier: UrgencyTier,
    policy: &TierPolicy,
    config: &EngineConfig,
) -> Result<U256, GasError> {
    match detected {
        DetectedModel::Dynamic { samples } => {
            let mut pool: Vec<U256> = samples
                .iter()
                .flat_map(|s| s.rewards.iter().copied())
                .collect();

            if pool.is_empty() || pool.iter().all(U256::is_zero) {
                let fallback = config
                    .min_tip_wei()
                    .checked_mul(U256::from(tier.ordinal() as u64 + 1))
                    .ok_or_else(|| GasError::UnreasonableFee {
                        fee: config.min_tip_wei(),
                        ceiling: config.fee_ceiling_wei(),
                    })?;
                warn!(%tier, %fallback, "degenerate fee history, using minimum tip fallback");
                return Ok(fallback);
            }

            pool.sort_unstable();
            Ok(percentile_floor(&pool, policy.percentile))
        }
        DetectedModel::Legacy { gas_price } => {
            let scaled = gas_price
                .checked_mul(U256::from(policy.price_multiplier_percent))
                .map(|v| v / U256::from(100u64))
                .ok_or_else(|| GasError::UnreasonableFee {
                    fee: *gas_price,
                    ceiling: config.fee_ceiling_wei(),
                })?;
            // Never suggest a price below the network's current minimum.
            Ok(scaled.max(*gas_price))
        }
    }
}

/// Percentile of a sorted, non-empty sample using a floor index, so an
/// even-length median resolves to the lower of the two middle values.
/// Deterministic and reproducible.
fn percentile_floor(sorted: &[U256], percentile: u64) -> U256 {
    let percentile = percentile.min(100) as usize;
    let idx = percentile * (sorted.len() - 1) / 100;
    sorted[idx]
}
