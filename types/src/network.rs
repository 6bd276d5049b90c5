//! Network identifier.

use serde::{Deserialize, Serialize};

use crate::params::{BLOCKCHAIN, NETWORK};

/// Identifies which Mochimo network a request targets.
///
/// Attached to the body of every request sent to the node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkIdentifier {
    pub blockchain: String,
    pub network: String,
}

impl NetworkIdentifier {
    pub fn new(blockchain: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            blockchain: blockchain.into(),
            network: network.into(),
        }
    }

    /// The production network (`mochimo` / `mainnet`).
    pub fn mainnet() -> Self {
        Self::new(BLOCKCHAIN, NETWORK)
    }
}

impl Default for NetworkIdentifier {
    fn default() -> Self {
        Self::mainnet()
    }
}
