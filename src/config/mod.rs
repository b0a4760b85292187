//! Engine configuration: fee margins, history window, tier policy table.
//!
//! The `{tier -> policy}` mapping keeps tier semantics out of the engine
//! core; new tiers or chain-specific policies plug in here without touching
//! the pipeline.

use crate::types::UrgencyTier;
use ethers::types::U256;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-tier pricing policy.
///
/// `percentile` selects from the pooled fee-history rewards on dynamic
/// chains; `price_multiplier_percent` scales the tracked gas price on
/// legacy chains (floored at the tracked price, so 90 still pays the
/// network's current minimum).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    pub percentile: u64,
    pub price_multiplier_percent: u64,
}

/// Configuration for a [`crate::engine::GasEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    history_blocks: u64,
    base_fee_margin_percent: u64,
    trend_margin_bump_percent: u64,
    gas_limit_margin_percent: u64,
    min_tip_wei: U256,
    fee_ceiling_wei: U256,
    call_timeout: Duration,
    tiers: BTreeMap<UrgencyTier, TierPolicy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_blocks: Self::HISTORY_BLOCKS_DEFAULT,
            base_fee_margin_percent: Self::BASE_FEE_MARGIN_PERCENT_DEFAULT,
            trend_margin_bump_percent: Self::TREND_MARGIN_BUMP_PERCENT_DEFAULT,
            gas_limit_margin_percent: Self::GAS_LIMIT_MARGIN_PERCENT_DEFAULT,
            min_tip_wei: gwei_to_wei(1),
            fee_ceiling_wei: gwei_to_wei(10_000),
            call_timeout: Duration::from_secs(10),
            tiers: default_tiers(),
        }
    }
}

impl EngineConfig {
    /// Fee-history window length in blocks.
    pub const HISTORY_BLOCKS_DEFAULT: u64 = 20;
    /// Fee-cap margin over the latest base fee (120 = 1.2x).
    pub const BASE_FEE_MARGIN_PERCENT_DEFAULT: u64 = 120;
    /// Extra margin applied when the window shows rising base fees.
    pub const TREND_MARGIN_BUMP_PERCENT_DEFAULT: u64 = 10;
    /// Safety margin over the simulated gas estimate (120 = 1.2x).
    pub const GAS_LIMIT_MARGIN_PERCENT_DEFAULT: u64 = 120;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_blocks(mut self, blocks: u64) -> Self {
        self.history_blocks = blocks.max(1);
        self
    }

    pub fn with_base_fee_margin_percent(mut self, percent: u64) -> Self {
        self.base_fee_margin_percent = percent;
        self
    }

    pub fn with_trend_margin_bump_percent(mut self, percent: u64) -> Self {
        self.trend_margin_bump_percent = percent;
        self
    }

    pub fn with_gas_limit_margin_percent(mut self, percent: u64) -> Self {
        self.gas_limit_margin_percent = percent;
        self
    }

    pub fn with_min_tip_wei(mut self, wei: U256) -> Self {
        self.min_tip_wei = wei;
        self
    }

    pub fn with_fee_ceiling_wei(mut self, wei: U256) -> Self {
        self.fee_ceiling_wei = wei;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Insert or replace a tier policy.
    pub fn with_tier_policy(mut self, tier: UrgencyTier, policy: TierPolicy) -> Self {
        self.tiers.insert(tier, policy);
        self
    }

    pub fn history_blocks(&self) -> u64 {
        self.history_blocks
    }

    pub fn base_fee_margin_percent(&self) -> u64 {
        self.base_fee_margin_percent
    }

    pub fn trend_margin_bump_percent(&self) -> u64 {
        self.trend_margin_bump_percent
    }

    pub fn gas_limit_margin_percent(&self) -> u64 {
        self.gas_limit_margin_percent
    }

    pub fn min_tip_wei(&self) -> U256 {
        self.min_tip_wei
    }

    pub fn fee_ceiling_wei(&self) -> U256 {
        self.fee_ceiling_wei
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Policy for the requested tier; `None` means the tier is not
    /// recognized and the request must be rejected.
    pub fn tier_policy(&self, tier: UrgencyTier) -> Option<&TierPolicy> {
        self.tiers.get(&tier)
    }

    /// Distinct percentiles to request from the node, ascending.
    pub fn reward_percentiles(&self) -> Vec<f64> {
        let mut percentiles: Vec<u64> = self.tiers.values().map(|p| p.percentile).collect();
        percentiles.sort_unstable();
        percentiles.dedup();
        percentiles.into_iter().map(|p| p as f64).collect()
    }
}

fn default_tiers() -> BTreeMap<UrgencyTier, TierPolicy> {
    BTreeMap::from([
        (
            UrgencyTier::Slow,
            TierPolicy {
                percentile: 10,
                price_multiplier_percent: 90,
            },
        ),
        (
            UrgencyTier::Normal,
            TierPolicy {
                percentile: 50,
                price_multiplier_percent: 100,
            },
        ),
        (
            UrgencyTier::Fast,
            TierPolicy {
                percentile: 90,
                price_multiplier_percent: 120,
            },
        ),
    ])
}

/// Convert whole gwei to wei without going through floating point.
pub fn gwei_to_wei(gwei: u64) -> U256 {
    U256::from(gwei) * U256::exp10(9)
}

/// Deserialize helper for EngineConfig from TOML. Absent fields keep their
/// defaults.
#[derive(Debug, Deserialize)]
pub struct EngineConfigToml {
    pub history_blocks: Option<u64>,
    pub base_fee_margin_percent: Option<u64>,
    pub trend_margin_bump_percent: Option<u64>,
    pub gas_limit_margin_percent: Option<u64>,
    pub min_tip_gwei: Option<u64>,
    pub fee_ceiling_gwei: Option<u64>,
    pub call_timeout_ms: Option<u64>,
}

impl From<EngineConfigToml> for EngineConfig {
    fn from(toml: EngineConfigToml) -> Self {
        let mut config = EngineConfig::default();
        if let Some(blocks) = toml.history_blocks {
            config = config.with_history_blocks(blocks);
        }
        if let Some(percent) = toml.base_fee_margin_percent {
            config = config.with_base_fee_margin_percent(percent);
        }
        if let Some(percent) = toml.trend_margin_bump_percent {
            config = config.with_trend_margin_bump_percent(percent);
        }
        if let Some(percent) = toml.gas_limit_margin_percent {
            config = config.with_gas_limit_margin_percent(percent);
        }
        if let Some(gwei) = toml.min_tip_gwei {
            config = config.with_min_tip_wei(gwei_to_wei(gwei));
        }
        if let Some(gwei) = toml.fee_ceiling_gwei {
            config = config.with_fee_ceiling_wei(gwei_to_wei(gwei));
        }
        if let Some(ms) = toml.call_timeout_ms {
            config = config.with_call_timeout(Duration::from_millis(ms));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gwei_to_wei() {
        assert_eq!(gwei_to_wei(1), U256::from(1_000_000_000u64));
        assert_eq!(gwei_to_wei(50), U256::from(50_000_000_000u64));
    }

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_blocks(), 20);
        assert_eq!(config.base_fee_margin_percent(), 120);
        assert_eq!(config.gas_limit_margin_percent(), 120);
        assert_eq!(config.min_tip_wei(), gwei_to_wei(1));
        assert_eq!(config.fee_ceiling_wei(), gwei_to_wei(10_000));
    }

    #[test]
    fn test_default_tier_table() {
        let config = EngineConfig::default();
        let fast = config.tier_policy(UrgencyTier::Fast).unwrap();
        assert_eq!(fast.percentile, 90);
        assert_eq!(fast.price_multiplier_percent, 120);

        let slow = config.tier_policy(UrgencyTier::Slow).unwrap();
        assert_eq!(slow.percentile, 10);
        assert_eq!(slow.price_multiplier_percent, 90);
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::new()
            .with_history_blocks(10)
            .with_base_fee_margin_percent(150)
            .with_fee_ceiling_wei(gwei_to_wei(500));

        assert_eq!(config.history_blocks(), 10);
        assert_eq!(config.base_fee_margin_percent(), 150);
        assert_eq!(config.fee_ceiling_wei(), gwei_to_wei(500));
    }

    #[test]
    fn test_reward_percentiles_sorted_dedup() {
        let config = EngineConfig::default().with_tier_policy(
            UrgencyTier::Slow,
            TierPolicy {
                percentile: 50,
                price_multiplier_percent: 90,
            },
        );
        assert_eq!(config.reward_percentiles(), vec![50.0, 90.0]);
    }

    #[test]
    fn test_toml_conversion() {
        let toml = EngineConfigToml {
            history_blocks: Some(5),
            base_fee_margin_percent: None,
            trend_margin_bump_percent: Some(0),
            gas_limit_margin_percent: Some(110),
            min_tip_gwei: Some(2),
            fee_ceiling_gwei: None,
            call_timeout_ms: Some(2_500),
        };

        let config: EngineConfig = toml.into();
        assert_eq!(config.history_blocks(), 5);
        assert_eq!(config.base_fee_margin_percent(), 120);
        assert_eq!(config.trend_margin_bump_percent(), 0);
        assert_eq!(config.gas_limit_margin_percent(), 110);
        assert_eq!(config.min_tip_wei(), gwei_to_wei(2));
        assert_eq!(config.call_timeout(), Duration::from_millis(2_500));
    }
}
