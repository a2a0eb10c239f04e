//! Celestia node client configuration.
//!
//! Defaults target a local RPC proxy in front of a light node. Override via
//! environment variables or explicit construction for staging/testing.

use url::Url;
use zeroize::Zeroizing;
use zkl_core::config::{env_parse, env_token, env_url, parse_url};

pub use zkl_core::ConfigError;

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://localhost:3080/api/celestia";

/// Default gas price passed to `blob.Submit`.
pub const DEFAULT_GAS_PRICE: f64 = 0.002;

/// Default retry count for read-only calls.
pub const DEFAULT_READ_RETRIES: u32 = 2;

/// Configuration for connecting to a Celestia node.
///
/// Custom `Debug` implementation redacts the `auth_token` field.
#[derive(Clone)]
pub struct CelestiaConfig {
    /// JSON-RPC endpoint. Every call is a POST to this URL.
    pub rpc_url: Url,
    /// Node auth token, sent as a bearer token.
    pub auth_token: Zeroizing<String>,
    /// Gas price for blob submissions.
    pub gas_price: f64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Extra attempts for read-only calls on transport errors.
    /// Submissions are never retried.
    pub read_retries: u32,
}

impl std::fmt::Debug for CelestiaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelestiaConfig")
            .field("rpc_url", &self.rpc_url)
            .field("auth_token", &"[REDACTED]")
            .field("gas_price", &self.gas_price)
            .field("timeout_secs", &self.timeout_secs)
            .field("read_retries", &self.read_retries)
            .finish()
    }
}

impl CelestiaConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ZKL_CELESTIA_URL` (default: `http://localhost:3080/api/celestia`)
    /// - `ZKL_CELESTIA_TOKEN` (required)
    /// - `ZKL_CELESTIA_GAS_PRICE` (default: 0.002)
    /// - `ZKL_CELESTIA_TIMEOUT_SECS` (default: 30)
    /// - `ZKL_CELESTIA_READ_RETRIES` (default: 2)
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_token = env_token("ZKL_CELESTIA_TOKEN")?;
        let rpc_url = env_url("ZKL_CELESTIA_URL", DEFAULT_RPC_URL)?;

        let gas_price = env_parse("ZKL_CELESTIA_GAS_PRICE", DEFAULT_GAS_PRICE)?;
        if !(gas_price.is_finite() && gas_price > 0.0) {
            return Err(ConfigError::InvalidValue(
                "ZKL_CELESTIA_GAS_PRICE".into(),
                format!("must be a positive number, got {gas_price}"),
            ));
        }

        Ok(Self {
            rpc_url,
            auth_token: Zeroizing::new(auth_token),
            gas_price,
            timeout_secs: env_parse("ZKL_CELESTIA_TIMEOUT_SECS", 30)?,
            read_retries: env_parse("ZKL_CELESTIA_READ_RETRIES", DEFAULT_READ_RETRIES)?,
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(rpc_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            rpc_url: parse_url(rpc_url)?,
            auth_token: Zeroizing::new(token.to_string()),
            gas_price: DEFAULT_GAS_PRICE,
            timeout_secs: 5,
            read_retries: 0,
        })
    }
}
