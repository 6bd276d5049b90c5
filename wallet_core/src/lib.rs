//! Construction pipeline for Mochimo transfers.
//!
//! - **construction**: the build-and-sign state machine over the node's construction endpoints.
//! - **monitor**: waits for a submitted transaction to reach the mempool.
//! - **config**: TOML client configuration.
//! - **wallet**: balance, tag resolution and one-call transfers for a single signer.
//!
//! Signing itself is external: anything implementing
//! [`mochimo_types::WalletKeys`] can drive a flow.

pub mod config;
pub mod construction;
pub mod error;
pub mod monitor;
pub mod wallet;

pub use config::ClientConfig;
pub use construction::{ConstructionFlow, ConstructionStep, SignedBuild};
pub use error::WalletError;
pub use monitor::{MempoolMonitor, MonitorPolicy};
pub use wallet::{TransferReceipt, TransferRequest, Wallet};
