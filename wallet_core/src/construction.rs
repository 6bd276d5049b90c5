//! The build-and-sign pipeline as an explicit state machine.
//!
//! ```text
//! BuiltOperations → Preprocessed → MetadataFetched → PayloadsFetched
//!     → [external signing] → Combined → Submitted → Monitored
//! ```
//!
//! Each transition is one method and requires the flow to sit in the state
//! before it; anything else fails with [`WalletError::OutOfOrder`] without a
//! node call. A failed transition leaves the flow in its last good state and
//! records the step that failed, so the caller can re-run that step or drop
//! the flow. Nothing is retried here.

use std::fmt;
use tracing::Instrument;

use mochimo_rpc::messages::{MempoolTransactionResponse, MetadataResponse, PayloadsResponse, PreprocessResponse};
use mochimo_rpc::{ConstructionClient, HttpTransport, Transport};
use mochimo_transactions::{build_operations, TransferIntent};
use mochimo_types::{
    strip_hex_prefix, Amount, ConstructionMetadata, Operation, PreprocessMetadata,
    PreprocessOptions, PublicKey, Signature, SigningPayload, TransactionIdentifier, WalletKeys,
};

use crate::error::WalletError;
use crate::monitor::{MempoolMonitor, MonitorPolicy};

/// Where a construction flow stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstructionStep {
    BuiltOperations,
    Preprocessed,
    MetadataFetched,
    PayloadsFetched,
    Combined,
    Submitted,
    Monitored,
}

impl ConstructionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuiltOperations => "built_operations",
            Self::Preprocessed => "preprocessed",
            Self::MetadataFetched => "metadata_fetched",
            Self::PayloadsFetched => "payloads_fetched",
            Self::Combined => "combined",
            Self::Submitted => "submitted",
            Self::Monitored => "monitored",
        }
    }
}

impl fmt::Display for ConstructionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Each state holds exactly what the next transition consumes.
enum State {
    BuiltOperations,
    Preprocessed(PreprocessResponse),
    MetadataFetched(MetadataResponse),
    PayloadsFetched {
        unsigned_transaction: String,
        payload: SigningPayload,
    },
    Combined {
        signed_transaction: String,
    },
    Submitted(TransactionIdentifier),
    Monitored(MempoolTransactionResponse),
}

impl State {
    fn step(&self) -> ConstructionStep {
        match self {
            Self::BuiltOperations => ConstructionStep::BuiltOperations,
            Self::Preprocessed(_) => ConstructionStep::Preprocessed,
            Self::MetadataFetched(_) => ConstructionStep::MetadataFetched,
            Self::PayloadsFetched { .. } => ConstructionStep::PayloadsFetched,
            Self::Combined { .. } => ConstructionStep::Combined,
            Self::Submitted(_) => ConstructionStep::Submitted,
            Self::Monitored(_) => ConstructionStep::Monitored,
        }
    }
}

/// Everything the pipeline produced up to the combined transaction.
#[derive(Clone, Debug)]
pub struct SignedBuild {
    pub operations: Vec<Operation>,
    pub options: PreprocessOptions,
    pub metadata: ConstructionMetadata,
    pub suggested_fee: Vec<Amount>,
    pub unsigned_transaction: String,
    pub payloads: Vec<SigningPayload>,
    pub signature: Signature,
    pub signed_transaction: String,
}

/// One transaction's walk through the construction protocol.
pub struct ConstructionFlow<T = HttpTransport> {
    client: ConstructionClient<T>,
    operations: Vec<Operation>,
    public_keys: Vec<PublicKey>,
    state: State,
    failed: Option<ConstructionStep>,
    span: tracing::Span,
}

impl<T: Transport> ConstructionFlow<T> {
    /// Start a flow for `intent`, signed by the holder of `public_key`.
    pub fn new(client: ConstructionClient<T>, intent: &TransferIntent, public_key: PublicKey) -> Self {
        Self::from_operations(client, build_operations(intent), vec![public_key])
    }

    /// Start a flow from an already built operation list.
    pub fn from_operations(
        client: ConstructionClient<T>,
        operations: Vec<Operation>,
        public_keys: Vec<PublicKey>,
    ) -> Self {
        Self {
            client,
            operations,
            public_keys,
            state: State::BuiltOperations,
            failed: None,
            span: tracing::debug_span!("construction"),
        }
    }

    /// Log this flow's events inside `span` instead of the default one.
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    pub fn step(&self) -> ConstructionStep {
        self.state.step()
    }

    /// The step whose transition failed last, if any.
    pub fn failed_step(&self) -> Option<ConstructionStep> {
        self.failed
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn unsigned_transaction(&self) -> Option<&str> {
        match &self.state {
            State::PayloadsFetched {
                unsigned_transaction,
                ..
            } => Some(unsigned_transaction),
            _ => None,
        }
    }

    pub fn signing_payload(&self) -> Option<&SigningPayload> {
        match &self.state {
            State::PayloadsFetched { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn signed_transaction(&self) -> Option<&str> {
        match &self.state {
            State::Combined { signed_transaction } => Some(signed_transaction),
            _ => None,
        }
    }

    pub fn transaction_identifier(&self) -> Option<&TransactionIdentifier> {
        match &self.state {
            State::Submitted(id) => Some(id),
            State::Monitored(record) => Some(&record.transaction.transaction_identifier),
            _ => None,
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────

    /// `BuiltOperations → Preprocessed`. Returns the options the node requires.
    pub async fn preprocess(
        &mut self,
        metadata: &PreprocessMetadata,
    ) -> Result<PreprocessOptions, WalletError> {
        self.expect(ConstructionStep::BuiltOperations)?;
        let result = self
            .client
            .preprocess(&self.operations, metadata)
            .instrument(self.span.clone())
            .await
            .map_err(WalletError::from);
        let response = self.record(ConstructionStep::Preprocessed, result)?;

        let options = response.options.clone();
        self.span.in_scope(|| {
            tracing::debug!(
                required_public_keys = response.required_public_keys.len(),
                "preprocess options received"
            )
        });
        self.advance(State::Preprocessed(response));
        Ok(options)
    }

    /// `Preprocessed → MetadataFetched`, forwarding the preprocess options unchanged.
    pub async fn fetch_metadata(&mut self) -> Result<MetadataResponse, WalletError> {
        let options = match &self.state {
            State::Preprocessed(response) => response.options.clone(),
            other => return Err(out_of_order(ConstructionStep::Preprocessed, other)),
        };
        let result = self
            .client
            .metadata(&options, &self.public_keys)
            .instrument(self.span.clone())
            .await
            .map_err(WalletError::from);
        let response = self.record(ConstructionStep::MetadataFetched, result)?;

        self.advance(State::MetadataFetched(response.clone()));
        Ok(response)
    }

    /// `MetadataFetched → PayloadsFetched`. Exactly one signing payload must come back.
    pub async fn fetch_payloads(&mut self) -> Result<PayloadsResponse, WalletError> {
        let metadata = match &self.state {
            State::MetadataFetched(response) => response.metadata.clone(),
            other => return Err(out_of_order(ConstructionStep::MetadataFetched, other)),
        };
        let result = self
            .client
            .payloads(&self.operations, &metadata, &self.public_keys)
            .instrument(self.span.clone())
            .await
            .map_err(WalletError::from)
            .and_then(|response| match response.payloads.len() {
                1 => Ok(response),
                count => Err(WalletError::UnexpectedPayloadCount { count }),
            });
        let response = self.record(ConstructionStep::PayloadsFetched, result)?;

        self.advance(State::PayloadsFetched {
            unsigned_transaction: response.unsigned_transaction.clone(),
            payload: response.payloads[0].clone(),
        });
        Ok(response)
    }

    /// Check that the node parses the unsigned transaction back into the built operations.
    ///
    /// Allowed only in `PayloadsFetched`; does not change state.
    pub async fn verify_unsigned(&self) -> Result<(), WalletError> {
        let unsigned = match &self.state {
            State::PayloadsFetched {
                unsigned_transaction,
                ..
            } => unsigned_transaction.as_str(),
            other => return Err(out_of_order(ConstructionStep::PayloadsFetched, other)),
        };
        let parsed = self
            .client
            .parse(unsigned, false)
            .instrument(self.span.clone())
            .await?;

        for op in &self.operations {
            let matched = parsed.operations.iter().any(|p| {
                p.index() == op.index() && p.kind == op.kind && p.amount.value == op.amount.value
            });
            if !matched {
                return Err(WalletError::ParseMismatch(format!(
                    "operation {} ({:?}, {}) missing from parsed transaction",
                    op.index(),
                    op.kind,
                    op.amount.value
                )));
            }
        }
        Ok(())
    }

    /// Have `keys` sign the unsigned transaction and wrap the result for combine.
    ///
    /// The signature bytes are not inspected.
    pub fn sign<K: WalletKeys + ?Sized>(&self, keys: &K) -> Result<Signature, WalletError> {
        let (unsigned, payload) = match &self.state {
            State::PayloadsFetched {
                unsigned_transaction,
                payload,
            } => (unsigned_transaction, payload),
            other => return Err(out_of_order(ConstructionStep::PayloadsFetched, other)),
        };
        let bytes = hex::decode(strip_hex_prefix(unsigned))
            .map_err(|e| WalletError::InvalidUnsignedTransaction(e.to_string()))?;
        let signature = keys.sign(&bytes)?;
        Ok(Signature::wotsp(payload, &keys.public_key(), &signature))
    }

    /// `PayloadsFetched → Combined`. Returns the signed transaction.
    pub async fn combine(&mut self, signature: Signature) -> Result<String, WalletError> {
        let unsigned = match &self.state {
            State::PayloadsFetched {
                unsigned_transaction,
                ..
            } => unsigned_transaction.clone(),
            other => return Err(out_of_order(ConstructionStep::PayloadsFetched, other)),
        };
        let result = self
            .client
            .combine(&unsigned, std::slice::from_ref(&signature))
            .instrument(self.span.clone())
            .await
            .map_err(WalletError::from);
        let response = self.record(ConstructionStep::Combined, result)?;

        self.advance(State::Combined {
            signed_transaction: response.signed_transaction.clone(),
        });
        Ok(response.signed_transaction)
    }

    /// `Combined → Submitted`. A reply without a hash fails and keeps the flow at `Combined`.
    pub async fn submit(&mut self) -> Result<TransactionIdentifier, WalletError> {
        let signed = match &self.state {
            State::Combined { signed_transaction } => signed_transaction.clone(),
            other => return Err(out_of_order(ConstructionStep::Combined, other)),
        };
        let result = self
            .client
            .submit(&signed)
            .instrument(self.span.clone())
            .await
            .map_err(WalletError::from);
        let id = self.record(ConstructionStep::Submitted, result)?;

        self.span
            .in_scope(|| tracing::info!(hash = %id, "transaction submitted"));
        self.advance(State::Submitted(id.clone()));
        Ok(id)
    }

    /// `Submitted → Monitored`: wait for the transaction to appear in the mempool.
    pub async fn monitor(
        &mut self,
        policy: MonitorPolicy,
    ) -> Result<MempoolTransactionResponse, WalletError> {
        let id = match &self.state {
            State::Submitted(id) => id.clone(),
            other => return Err(out_of_order(ConstructionStep::Submitted, other)),
        };
        let monitor = MempoolMonitor::new(self.client.clone()).with_policy(policy);
        let result = monitor.wait(&id).instrument(self.span.clone()).await;
        let record = self.record(ConstructionStep::Monitored, result)?;

        self.advance(State::Monitored(record.clone()));
        Ok(record)
    }

    /// Drive the flow from `BuiltOperations` to `Combined`, signing with `keys`.
    pub async fn build_and_sign<K: WalletKeys + ?Sized>(
        &mut self,
        keys: &K,
        metadata: &PreprocessMetadata,
    ) -> Result<SignedBuild, WalletError> {
        let options = self.preprocess(metadata).await?;
        let construction = self.fetch_metadata().await?;
        let payloads = self.fetch_payloads().await?;
        let signature = self.sign(keys)?;
        let signed_transaction = self.combine(signature.clone()).await?;

        Ok(SignedBuild {
            operations: self.operations.clone(),
            options,
            metadata: construction.metadata,
            suggested_fee: construction.suggested_fee,
            unsigned_transaction: payloads.unsigned_transaction,
            payloads: payloads.payloads,
            signature,
            signed_transaction,
        })
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn expect(&self, expected: ConstructionStep) -> Result<(), WalletError> {
        if self.state.step() == expected {
            Ok(())
        } else {
            Err(out_of_order(expected, &self.state))
        }
    }

    fn record<V>(
        &mut self,
        attempted: ConstructionStep,
        result: Result<V, WalletError>,
    ) -> Result<V, WalletError> {
        match &result {
            Ok(_) => self.failed = None,
            Err(e) => {
                self.failed = Some(attempted);
                self.span.in_scope(|| {
                    tracing::warn!(step = %attempted, error = %e, "construction step failed")
                });
            }
        }
        result
    }

    fn advance(&mut self, next: State) {
        let from = self.state.step();
        let to = next.step();
        self.state = next;
        self.span
            .in_scope(|| tracing::debug!(%from, %to, "construction step complete"));
    }
}

fn out_of_order(expected: ConstructionStep, state: &State) -> WalletError {
    WalletError::OutOfOrder {
        expected,
        actual: state.step(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names() {
        assert_eq!(ConstructionStep::BuiltOperations.to_string(), "built_operations");
        assert_eq!(ConstructionStep::PayloadsFetched.to_string(), "payloads_fetched");
        assert_eq!(ConstructionStep::Monitored.as_str(), "monitored");
    }

    #[test]
    fn out_of_order_reports_both_steps() {
        let err = out_of_order(ConstructionStep::MetadataFetched, &State::BuiltOperations);
        assert_eq!(
            err.to_string(),
            "construction step out of order: expected metadata_fetched, flow is at built_operations"
        );
    }
}
