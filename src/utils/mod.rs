//! Internal utility modules: the ethers node-client adapter and tracing
//! setup. Marked `pub(crate)` to enforce API boundaries; selected items
//! are re-exported from the crate root.

pub(crate) mod eth_client;
pub(crate) mod logger;

pub use eth_client::EthersNodeClient;
pub use logger::setup_logger;
