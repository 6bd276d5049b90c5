//! Protocol constants of the Mochimo construction API.

/// Ticker of the native currency.
pub const CURRENCY_SYMBOL: &str = "MCM";

/// Decimal places of the native currency (1 MCM = 10^9 nanoMCM).
pub const CURRENCY_DECIMALS: u32 = 9;

/// Blockchain name carried in every `network_identifier`.
pub const BLOCKCHAIN: &str = "mochimo";

/// Default network name carried in every `network_identifier`.
pub const NETWORK: &str = "mainnet";

/// Status attached to every operation built by this client.
pub const STATUS_SUCCESS: &str = "SUCCESS";
