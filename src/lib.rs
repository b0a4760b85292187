//! # Gas Engine - Fee Parameter Suggestion for EVM Chains
//!
//! Given a node client, a pending call and an urgency tier, this crate
//! produces a consistent set of transaction fee parameters (legacy gas
//! price, or EIP-1559 tip/fee caps) plus an estimated gas limit, ready to
//! be embedded into an unsigned transaction by an external builder.
//!
//! ## Modules
//!
//! - [`config`] - Engine knobs and the `{tier -> policy}` table
//! - [`engine`] - The suggestion pipeline ([`GasEngine`])
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - The injected node-client capability
//! - [`types`] - Tiers, call intents, fee parameters
//!
//! ## Example
//!
//! ```no_run
//! use gas_engine::{CallIntent, EthersNodeClient, GasEngine, UrgencyTier};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EthersNodeClient::connect("https://rpc.ankr.com/eth")?;
//! let engine = GasEngine::new(client);
//!
//! let intent = CallIntent::transfer(
//!     "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0".parse()?,
//!     "0x0000000000000000000000000000000000000001".parse()?,
//!     ethers::types::U256::exp10(17),
//! );
//!
//! let token = CancellationToken::new();
//! let suggestion = engine.suggest(&intent, UrgencyTier::Normal, &token).await?;
//! println!("{}", suggestion.params);
//! # Ok(())
//! # }
//! ```

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod engine;
pub mod error;
pub mod traits;
pub mod types;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{gwei_to_wei, EngineConfig, EngineConfigToml, TierPolicy};
pub use engine::GasEngine;
pub use error::{GasError, Stage};
pub use traits::{NodeClient, NodeClientError};
pub use types::{CallIntent, FeeHistorySample, FeeModel, FeeParams, GasSuggestion, UrgencyTier};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{setup_logger, EthersNodeClient};
