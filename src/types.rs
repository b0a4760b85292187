//! Core value types: urgency tiers, fee models, call intents and the
//! assembled suggestion.
//!
//! All fee quantities are `U256` wei. Ratios elsewhere in the crate are
//! integer percents, so no floating point ever touches a fee value.

use crate::error::GasError;
use ethers::types::{Address, Bytes, U256};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Caller's requested speed/cost tradeoff.
///
/// Ordinal ranking only; the numeric mapping lives in the tier policy
/// table ([`crate::config::TierPolicy`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Slow,
    Normal,
    Fast,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 3] = [UrgencyTier::Slow, UrgencyTier::Normal, UrgencyTier::Fast];

    /// Zero-based ordinal (Slow = 0, Normal = 1, Fast = 2). Used to scale
    /// the minimum-tip fallback.
    pub fn ordinal(&self) -> u8 {
        match self {
            UrgencyTier::Slow => 0,
            UrgencyTier::Normal => 1,
            UrgencyTier::Fast => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Slow => "slow",
            UrgencyTier::Normal => "normal",
            UrgencyTier::Fast => "fast",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyTier {
    type Err = GasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(UrgencyTier::Slow),
            "normal" => Ok(UrgencyTier::Normal),
            "fast" => Ok(UrgencyTier::Fast),
            _ => Err(GasError::InvalidTier {
                value: s.to_string(),
            }),
        }
    }
}

/// Fee model of the target chain, detected per request and never cached
/// across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeModel {
    Legacy,
    Dynamic,
}

/// A pending call to be priced: sender, optional recipient (`None` for
/// contract creation), value and payload.
#[derive(Debug, Clone, Default)]
pub struct CallIntent {
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
}

impl CallIntent {
    pub fn new(from: Address, to: Option<Address>, value: U256, data: Bytes) -> Self {
        Self {
            from,
            to,
            value,
            data,
        }
    }

    /// Plain value transfer with an empty payload.
    pub fn transfer(from: Address, to: Address, value: U256) -> Self {
        Self {
            from,
            to: Some(to),
            value,
            data: Bytes::default(),
        }
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// One historical block's base fee and observed priority-fee percentiles.
///
/// Samples are ordered most-recent-last; `rewards[i]` corresponds to the
/// i-th percentile requested from the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeHistorySample {
    pub base_fee: U256,
    pub rewards: Vec<U256>,
}

impl FeeHistorySample {
    pub fn new(base_fee: U256, rewards: Vec<U256>) -> Self {
        Self { base_fee, rewards }
    }
}

/// Fee parameters for exactly one fee model. Consumers must match on the
/// variant rather than assume field presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum FeeParams {
    Legacy {
        gas_price: U256,
    },
    Dynamic {
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    },
}

impl FeeParams {
    pub fn model(&self) -> FeeModel {
        match self {
            FeeParams::Legacy { .. } => FeeModel::Legacy,
            FeeParams::Dynamic { .. } => FeeModel::Dynamic,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, FeeParams::Legacy { .. })
    }

    /// Worst-case per-gas price the sender authorizes: the gas price for
    /// Legacy, the fee cap for Dynamic.
    pub fn effective_price(&self) -> U256 {
        match self {
            FeeParams::Legacy { gas_price } => *gas_price,
            FeeParams::Dynamic {
                max_fee_per_gas, ..
            } => *max_fee_per_gas,
        }
    }
}

impl fmt::Display for FeeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeParams::Legacy { gas_price } => write!(f, "legacy: gas_price={} wei", gas_price),
            FeeParams::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => write!(
                f,
                "dynamic: max_fee={} wei, tip={} wei",
                max_fee_per_gas, max_priority_fee_per_gas
            ),
        }
    }
}

/// The engine's result: fee parameters plus an estimated gas limit, ready
/// to be embedded into an unsigned transaction by an external builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasSuggestion {
    pub params: FeeParams,
    pub gas_limit: U256,
}

impl GasSuggestion {
    pub fn model(&self) -> FeeModel {
        self.params.model()
    }

    /// Worst-case total cost in wei (`gas_limit * effective_price`),
    /// excluding the transferred value. `None` when the product overflows.
    pub fn max_cost(&self) -> Option<U256> {
        self.gas_limit.checked_mul(self.params.effective_price())
    }
}
