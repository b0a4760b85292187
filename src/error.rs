//! # Engine Error Types
//!
//! Centralized error definitions for the gas-engine crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use crate::traits::NodeClientError;
use ethers::types::U256;
use std::fmt;
use thiserror::Error;

/// Pipeline stage that triggered a node-facing failure.
///
/// Wrapped into [`GasError`] so callers can tell which query expired or
/// failed without parsing error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Detection,
    BaseFee,
    PriorityFee,
    LimitEstimation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Detection => "fee-model detection",
            Stage::BaseFee => "base-fee fetch",
            Stage::PriorityFee => "priority-fee fetch",
            Stage::LimitEstimation => "gas-limit estimation",
        };
        f.write_str(name)
    }
}

/// Unified error type for suggestion requests.
///
/// A suggestion is never returned alongside an error; callers branch on
/// the variant. No stage swallows an error to produce a default value,
/// except the documented degenerate-history tip fallback.
#[derive(Error, Debug)]
pub enum GasError {
    /// Both the dynamic fee-history probe and the legacy gas-price probe
    /// failed. The chain cannot be classified and the caller must not
    /// proceed.
    #[error("node unavailable: {reason}")]
    NodeUnavailable { reason: String },

    /// The simulated call itself fails on current chain state. A fabricated
    /// default limit would be actively misleading, so the failure surfaces.
    #[error("call simulation reverted: {reason}")]
    SimulationReverted { reason: String },

    /// The requested urgency tier has no configured policy.
    #[error("invalid urgency tier: '{value}'")]
    InvalidTier { value: String },

    /// A computed per-gas fee exceeds the configured absolute ceiling.
    /// Guards against a corrupted or adversarial fee-history response.
    #[error("suggested fee {fee} wei exceeds ceiling {ceiling} wei")]
    UnreasonableFee { fee: U256, ceiling: U256 },

    /// The caller's cancellation token fired mid-flight.
    #[error("request cancelled during {stage}")]
    Cancelled { stage: Stage },

    /// The per-call deadline expired mid-flight.
    #[error("request timed out during {stage}")]
    Timeout { stage: Stage },

    /// A node-client failure, wrapped with the stage that triggered it and
    /// otherwise unmodified in substance.
    #[error("node error during {stage}: {source}")]
    Node {
        stage: Stage,
        #[source]
        source: NodeClientError,
    },

    /// The assembled suggestion failed its own consistency check. Always a
    /// logic defect, never silently corrected.
    #[error("internal invariant violation: {detail}")]
    InternalInvariantViolation { detail: String },
}

impl GasError {
    /// Stage attribution, where one applies.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            GasError::Cancelled { stage }
            | GasError::Timeout { stage }
            | GasError::Node { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Detection.to_string(), "fee-model detection");
        assert_eq!(Stage::LimitEstimation.to_string(), "gas-limit estimation");
    }

    #[test]
    fn test_stage_attribution() {
        let err = GasError::Timeout {
            stage: Stage::BaseFee,
        };
        assert_eq!(err.stage(), Some(Stage::BaseFee));

        let err = GasError::InvalidTier {
            value: "turbo".to_string(),
        };
        assert_eq!(err.stage(), None);
    }
}
