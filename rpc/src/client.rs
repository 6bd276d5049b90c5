//! Stateless client for the node's JSON endpoints.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use mochimo_types::{
    AccountIdentifier, ConstructionMetadata, NetworkIdentifier, Operation, PreprocessMetadata,
    PreprocessOptions, PublicKey, Signature, TransactionIdentifier,
};

use crate::error::{ErrorEnvelope, RpcError};
use crate::messages::*;
use crate::transport::{HttpTransport, Transport};

/// Typed wrapper around the node's construction, account and mempool endpoints.
///
/// Holds only the base URL, the network identifier and a shared transport, so
/// clones are cheap and independent flows may use one client concurrently.
pub struct ConstructionClient<T = HttpTransport> {
    transport: Arc<T>,
    base_url: String,
    network: NetworkIdentifier,
}

impl<T> Clone for ConstructionClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            network: self.network.clone(),
        }
    }
}

impl ConstructionClient<HttpTransport> {
    /// Create an HTTP client for `base_url` (e.g. `http://127.0.0.1:8080`) on mainnet.
    pub fn http(base_url: impl Into<String>) -> Result<Self, RpcError> {
        Ok(Self::new(
            base_url,
            NetworkIdentifier::mainnet(),
            Arc::new(HttpTransport::new()?),
        ))
    }
}

impl<T: Transport> ConstructionClient<T> {
    pub fn new(base_url: impl Into<String>, network: NetworkIdentifier, transport: Arc<T>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            network,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn network(&self) -> &NetworkIdentifier {
        &self.network
    }

    /// POST `request` to `path` and decode the reply.
    ///
    /// An error envelope in the body wins over the HTTP status; a non-success
    /// status without an envelope is reported as such.
    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let mut body = serde_json::to_value(request).map_err(|e| RpcError::InvalidResponse {
            path: path.to_string(),
            message: format!("failed to encode request: {e}"),
        })?;
        body.as_object_mut()
            .ok_or_else(|| RpcError::InvalidRequest {
                path: path.to_string(),
            })?
            .insert(
                "network_identifier".to_string(),
                serde_json::json!(self.network),
            );

        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let response = self.transport.post(&url, &body).await?;
        tracing::debug!(
            path,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "node call"
        );

        if let Some(envelope) = ErrorEnvelope::from_body(&response.body) {
            tracing::debug!(path, code = envelope.code, message = %envelope.message, "node error");
            return Err(envelope.into_error(path));
        }
        if !response.is_success() {
            return Err(RpcError::HttpStatus {
                path: path.to_string(),
                status: response.status,
            });
        }

        serde_json::from_value(response.body).map_err(|e| RpcError::InvalidResponse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    // ── Construction ─────────────────────────────────────────────────────

    pub async fn preprocess(
        &self,
        operations: &[Operation],
        metadata: &PreprocessMetadata,
    ) -> Result<PreprocessResponse, RpcError> {
        self.post(
            PREPROCESS_PATH,
            &PreprocessRequest {
                operations,
                metadata,
            },
        )
        .await
    }

    pub async fn metadata(
        &self,
        options: &PreprocessOptions,
        public_keys: &[PublicKey],
    ) -> Result<MetadataResponse, RpcError> {
        self.post(
            METADATA_PATH,
            &MetadataRequest {
                options,
                public_keys,
            },
        )
        .await
    }

    pub async fn payloads(
        &self,
        operations: &[Operation],
        metadata: &ConstructionMetadata,
        public_keys: &[PublicKey],
    ) -> Result<PayloadsResponse, RpcError> {
        self.post(
            PAYLOADS_PATH,
            &PayloadsRequest {
                operations,
                metadata,
                public_keys,
            },
        )
        .await
    }

    pub async fn combine(
        &self,
        unsigned_transaction: &str,
        signatures: &[Signature],
    ) -> Result<CombineResponse, RpcError> {
        self.post(
            COMBINE_PATH,
            &CombineRequest {
                unsigned_transaction,
                signatures,
            },
        )
        .await
    }

    /// Submit a signed transaction. A reply without a hash is an error.
    pub async fn submit(&self, signed_transaction: &str) -> Result<TransactionIdentifier, RpcError> {
        let response: SubmitResponse = self
            .post(SUBMIT_PATH, &SubmitRequest { signed_transaction })
            .await?;
        match response.transaction_identifier {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(RpcError::MissingTransactionHash),
        }
    }

    pub async fn parse(&self, transaction: &str, signed: bool) -> Result<ParseResponse, RpcError> {
        self.post(PARSE_PATH, &ParseRequest { transaction, signed })
            .await
    }

    // ── Account ──────────────────────────────────────────────────────────

    pub async fn account_balance(
        &self,
        account: &AccountIdentifier,
    ) -> Result<AccountBalanceResponse, RpcError> {
        self.post(
            BALANCE_PATH,
            &AccountBalanceRequest {
                account_identifier: account,
            },
        )
        .await
    }

    /// Resolve a tag to the address currently holding it.
    pub async fn resolve_tag(&self, tag: &str) -> Result<TagResolution, RpcError> {
        let response: CallResponse<TagResolution> = self
            .post(
                CALL_PATH,
                &CallRequest {
                    method: TAG_RESOLVE_METHOD,
                    parameters: serde_json::json!({ "tag": mochimo_types::normalize_hex(tag) }),
                },
            )
            .await?;
        Ok(response.result)
    }

    // ── Mempool ──────────────────────────────────────────────────────────

    pub async fn mempool(&self) -> Result<Vec<TransactionIdentifier>, RpcError> {
        let response: MempoolResponse = self.post(MEMPOOL_PATH, &EmptyRequest {}).await?;
        Ok(response.transaction_identifiers)
    }

    pub async fn mempool_transaction(
        &self,
        id: &TransactionIdentifier,
    ) -> Result<MempoolTransactionResponse, RpcError> {
        self.post(
            MEMPOOL_TRANSACTION_PATH,
            &MempoolTransactionRequest {
                transaction_identifier: id,
            },
        )
        .await
    }
}
