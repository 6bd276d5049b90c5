//! Mempool polling for submitted transactions.

use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

use mochimo_rpc::messages::MempoolTransactionResponse;
use mochimo_rpc::{ConstructionClient, HttpTransport, Transport};
use mochimo_types::TransactionIdentifier;
use mochimo_utils::format_duration;

use crate::error::WalletError;

/// How long to wait for a transaction and how often to ask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl MonitorPolicy {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1_000);

    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for MonitorPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_INTERVAL)
    }
}

/// Polls `/mempool/transaction` until a transaction shows up or the deadline passes.
///
/// Every failed lookup, whatever the cause, counts as "not there yet".
pub struct MempoolMonitor<T = HttpTransport> {
    client: ConstructionClient<T>,
    policy: MonitorPolicy,
}

impl<T: Transport> MempoolMonitor<T> {
    pub fn new(client: ConstructionClient<T>) -> Self {
        Self {
            client,
            policy: MonitorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MonitorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MonitorPolicy {
        self.policy
    }

    /// Wait for `id` using this monitor's policy.
    pub async fn wait(
        &self,
        id: &TransactionIdentifier,
    ) -> Result<MempoolTransactionResponse, WalletError> {
        self.wait_with(id, self.policy).await
    }

    /// Wait for `id` using an explicit policy.
    ///
    /// The deadline is fixed when the call starts. Each lookup and the last
    /// sleep are cut short to meet it, so a slow node cannot push the
    /// timeout past `policy.timeout`.
    pub async fn wait_with(
        &self,
        id: &TransactionIdentifier,
        policy: MonitorPolicy,
    ) -> Result<MempoolTransactionResponse, WalletError> {
        let started = Instant::now();
        let deadline = started + policy.timeout;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            match timeout(remaining, self.client.mempool_transaction(id)).await {
                Ok(Ok(record)) => {
                    tracing::info!(
                        hash = %id,
                        attempt = attempts,
                        elapsed = %format_duration(started.elapsed()),
                        "transaction seen in mempool"
                    );
                    return Ok(record);
                }
                Ok(Err(e)) => {
                    tracing::debug!(hash = %id, attempt = attempts, error = %e, "not in mempool yet");
                }
                Err(_) => {
                    tracing::debug!(hash = %id, attempt = attempts, "mempool lookup cut off at deadline");
                }
            }

            let now = Instant::now();
            if now >= deadline {
                let elapsed = now.duration_since(started);
                tracing::warn!(
                    hash = %id,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "gave up waiting for mempool"
                );
                return Err(WalletError::MonitorTimeout {
                    hash: id.to_string(),
                    elapsed_ms: elapsed.as_millis() as u64,
                    attempts,
                });
            }
            sleep(policy.interval.min(deadline - now)).await;
        }
    }

    /// One look at `/mempool`: is `id` among the pending identifiers?
    pub async fn is_pending(&self, id: &TransactionIdentifier) -> Result<bool, WalletError> {
        let pending = self.client.mempool().await?;
        Ok(pending.iter().any(|p| p.hash == id.hash))
    }
}
