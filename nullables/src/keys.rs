//! Nullable wallet keys: fixed identity, canned signatures.

use std::sync::Mutex;

use mochimo_types::{SignerError, WalletKeys};

/// A deterministic signer for testing.
///
/// Returns the same signature for every message and records what it signed.
pub struct NullKeys {
    address: String,
    tag: String,
    public_key: String,
    signature: Vec<u8>,
    fail: bool,
    signed: Mutex<Vec<Vec<u8>>>,
}

impl NullKeys {
    pub fn new(
        address: impl Into<String>,
        tag: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            tag: tag.into(),
            public_key: public_key.into(),
            signature: vec![0x5a; 64],
            fail: false,
            signed: Mutex::new(Vec::new()),
        }
    }

    /// A signer with fixed sample identity.
    pub fn sample() -> Self {
        Self::new("0x1111111111", "0x2222222222", "0x3333333333")
    }

    /// Return `signature` for every message.
    pub fn with_signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }

    /// A signer whose every `sign` call fails.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Messages passed to `sign`, in order.
    pub fn signed_messages(&self) -> Vec<Vec<u8>> {
        self.signed.lock().unwrap().clone()
    }
}

impl WalletKeys for NullKeys {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn tag(&self) -> String {
        self.tag.clone()
    }

    fn public_key(&self) -> String {
        self.public_key.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.signed.lock().unwrap().push(message.to_vec());
        if self.fail {
            return Err(SignerError("null signer configured to fail".into()));
        }
        Ok(self.signature.clone())
    }
}
