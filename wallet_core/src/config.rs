//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mochimo_rpc::{ConstructionClient, HttpTransport};
use mochimo_types::params::{BLOCKCHAIN, NETWORK};
use mochimo_types::NetworkIdentifier;
use mochimo_utils::LogFormat;

use crate::error::WalletError;
use crate::monitor::MonitorPolicy;

/// Configuration for talking to one Mochimo node.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Node base URL, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_blockchain")]
    pub blockchain: String,

    #[serde(default = "default_network")]
    pub network: String,

    /// Whole-request timeout for node calls.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// How long to wait for a submitted transaction to reach the mempool.
    #[serde(default = "default_monitor_timeout_ms")]
    pub monitor_timeout_ms: u64,

    /// Pause between mempool lookups.
    #[serde(default = "default_monitor_interval_ms")]
    pub monitor_interval_ms: u64,

    /// Reject malformed memos instead of sending an empty memo field.
    #[serde(default)]
    pub strict_memo: bool,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter, e.g. "info" or "info,mochimo_rpc=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_blockchain() -> String {
    BLOCKCHAIN.to_string()
}

fn default_network() -> String {
    NETWORK.to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_monitor_timeout_ms() -> u64 {
    60_000
}

fn default_monitor_interval_ms() -> u64 {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            WalletError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        let config: Self = toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(WalletError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.blockchain.is_empty() || self.network.is_empty() {
            return Err(WalletError::Config(
                "blockchain and network must not be empty".to_string(),
            ));
        }
        if self.monitor_interval_ms == 0 {
            return Err(WalletError::Config(
                "monitor_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn network_identifier(&self) -> NetworkIdentifier {
        NetworkIdentifier::new(&self.blockchain, &self.network)
    }

    pub fn monitor_policy(&self) -> MonitorPolicy {
        MonitorPolicy::new(
            Duration::from_millis(self.monitor_timeout_ms),
            Duration::from_millis(self.monitor_interval_ms),
        )
    }

    /// Build an HTTP-backed client with this configuration's timeouts.
    pub fn build_client(&self) -> Result<ConstructionClient<HttpTransport>, WalletError> {
        let transport = HttpTransport::with_timeouts(
            Duration::from_millis(self.request_timeout_ms),
            Duration::from_millis(self.connect_timeout_ms),
        )?;
        Ok(ConstructionClient::new(
            &self.base_url,
            self.network_identifier(),
            Arc::new(transport),
        ))
    }

    /// Install the global tracing subscriber described by `log_format` and `log_level`.
    pub fn init_logging(&self) -> Result<(), WalletError> {
        mochimo_utils::init_logging(self.log_format, &self.log_level)
            .map_err(|e| WalletError::Config(e.to_string()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            blockchain: default_blockchain(),
            network: default_network(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            monitor_timeout_ms: default_monitor_timeout_ms(),
            monitor_interval_ms: default_monitor_interval_ms(),
            strict_memo: false,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = ClientConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network_identifier(), NetworkIdentifier::mainnet());
        assert_eq!(config.monitor_policy(), MonitorPolicy::default());
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(!config.strict_memo);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            base_url = "https://node.example:8443"
            monitor_timeout_ms = 200
            monitor_interval_ms = 50
            log_format = "json"
        "#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.base_url, "https://node.example:8443");
        assert_eq!(
            config.monitor_policy(),
            MonitorPolicy::new(Duration::from_millis(200), Duration::from_millis(50))
        );
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ClientConfig::from_toml_str(r#"base_url = "node:8080""#).unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = ClientConfig::from_toml_str("monitor_interval_ms = 0").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ClientConfig::from_toml_file("/nonexistent/mochimo.toml");
        assert!(matches!(result, Err(WalletError::Config(_))));
    }
}
