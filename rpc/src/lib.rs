//! Client for the Mochimo node's JSON endpoints.
//!
//! Provides typed calls for:
//! - The construction protocol (preprocess, metadata, payloads, combine, submit, parse)
//! - Account balances and tag resolution
//! - Mempool queries
//!
//! Every request is an HTTP POST of a JSON object carrying the
//! `network_identifier`. The wire transport sits behind the [`Transport`]
//! trait so tests can swap it for a deterministic one.

pub mod client;
pub mod error;
pub mod messages;
pub mod transport;

pub use client::ConstructionClient;
pub use error::{ErrorEnvelope, RpcError};
pub use transport::{HttpTransport, Transport, TransportResponse};
