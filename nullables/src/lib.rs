//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the construction pipeline (the node behind
//! its HTTP endpoints, the wallet that signs) is reached through a trait.
//! This crate provides test-friendly implementations that:
//! - Return scripted values
//! - Record what they were asked to do
//! - Never touch the network or real keys
//!
//! Usage: swap real implementations for nullables in tests.

pub mod keys;
pub mod transport;

pub use keys::NullKeys;
pub use transport::{NullTransport, RecordedRequest};
