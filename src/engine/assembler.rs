//! Parameter assembly: merge tracked fees, the priority figure and the gas
//! limit into one consistent suggestion. Pure combination, no side effects.

use crate::config::EngineConfig;
use crate::engine::base_fee::TrackedFees;
use crate::engine::mul_percent_ceil;
use crate::error::GasError;
use crate::types::{FeeParams, GasSuggestion};
use ethers::types::U256;

pub(crate) fn assemble(
    tracked: &TrackedFees,
    priority: U256,
    gas_limit: U256,
    config: &EngineConfig,
) -> Result<GasSuggestion, GasError> {
    if gas_limit.is_zero() {
        return Err(GasError::InternalInvariantViolation {
            detail: "assembled gas limit is zero".to_string(),
        });
    }

    let params = match tracked {
        TrackedFees::Legacy { .. } => FeeParams::Legacy {
            gas_price: priority,
        },
        TrackedFees::Dynamic { base_fee, rising } => {
            let mut margin = config.base_fee_margin_percent();
            if *rising {
                // Base fee can climb between suggestion and inclusion.
                margin += config.trend_margin_bump_percent();
            }
            // A cap that overflows U256 is past any ceiling, so report it as
            // an unreasonable fee rather than panicking on hostile input.
            let overflow = || GasError::UnreasonableFee {
                fee: U256::max_value(),
                ceiling: config.fee_ceiling_wei(),
            };
            let max_fee_per_gas = mul_percent_ceil(*base_fee, margin)
                .and_then(|scaled| scaled.checked_add(priority))
                .ok_or_else(overflow)?;
            let floor = base_fee.checked_add(priority).ok_or_else(overflow)?;

            // Must hold given construction with margin >= 100; a violation
            // means a misconfigured margin or a logic defect.
            if max_fee_per_gas < floor {
                return Err(GasError::InternalInvariantViolation {
                    detail: format!(
                        "fee cap {} below base fee {} + tip {}",
                        max_fee_per_gas, base_fee, priority
                    ),
                });
            }

            FeeParams::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas: priority,
            }
        }
    };

    let per_gas = params.effective_price();
    if per_gas > config.fee_ceiling_wei() {
        return Err(GasError::UnreasonableFee {
            fee: per_gas,
            ceiling: config.fee_ceiling_wei(),
        });
    }

    Ok(GasSuggestion { params, gas_limit })
}
