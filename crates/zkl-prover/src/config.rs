//! Prover client configuration.
//!
//! Points at the remote prover's API root. Defaults target the production
//! prover network; override via environment variables or explicit
//! construction for staging/testing.

use std::time::Duration;

use url::Url;
use zeroize::Zeroizing;
use zkl_core::config::{env_parse, env_token, env_url, env_url_opt, parse_url};

pub use zkl_core::ConfigError;

use crate::poll::PollPolicy;

/// Default prover API root.
pub const DEFAULT_PROVER_URL: &str = "https://api.succinct.xyz/api";

/// Program the prover runs for file-integrity proofs.
pub const DEFAULT_PROGRAM_ID: &str = "zkl-file-verify-v1";

/// How long a network-status probe stays valid.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(60);

/// Configuration for connecting to the remote prover.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ProverConfig {
    /// API root; endpoints are resolved beneath it (`{base}/proofs/...`).
    pub base_url: Url,
    /// Bearer token sent on every call. Zeroized on drop.
    pub api_token: Zeroizing<String>,
    /// Program id submitted with generate and verify calls.
    pub program_id: String,
    /// Optional completion callback forwarded to the prover.
    pub callback_url: Option<Url>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Status polling policy.
    pub poll: PollPolicy,
    /// Validity window of the cached network status.
    pub status_ttl: Duration,
}

impl std::fmt::Debug for ProverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProverConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("program_id", &self.program_id)
            .field("callback_url", &self.callback_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("poll", &self.poll)
            .field("status_ttl", &self.status_ttl)
            .finish()
    }
}

impl ProverConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ZKL_PROVER_URL` (default: `https://api.succinct.xyz/api`)
    /// - `ZKL_PROVER_TOKEN` (required)
    /// - `ZKL_PROGRAM_ID` (default: `zkl-file-verify-v1`)
    /// - `ZKL_CALLBACK_URL` (optional)
    /// - `ZKL_TIMEOUT_SECS` (default: 30)
    /// - `ZKL_POLL_MAX_ATTEMPTS` (default: 30)
    /// - `ZKL_POLL_INTERVAL_MS` (default: 2000)
    /// - `ZKL_POLL_MAX_INTERVAL_MS` (optional; switches to exponential backoff
    ///   capped at this delay)
    /// - `ZKL_STATUS_TTL_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = env_token("ZKL_PROVER_TOKEN")?;

        let defaults = PollPolicy::default();
        let max_attempts = env_parse("ZKL_POLL_MAX_ATTEMPTS", defaults.max_attempts)?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "ZKL_POLL_MAX_ATTEMPTS".into(),
                "must be at least 1".into(),
            ));
        }
        let interval_ms = env_parse(
            "ZKL_POLL_INTERVAL_MS",
            u64::try_from(defaults.interval.as_millis()).unwrap_or(2_000),
        )?;

        let interval = Duration::from_millis(interval_ms);
        let poll = match std::env::var("ZKL_POLL_MAX_INTERVAL_MS") {
            Ok(_) => {
                let max_ms: u64 = env_parse("ZKL_POLL_MAX_INTERVAL_MS", interval_ms)?;
                PollPolicy::exponential(max_attempts, interval, Duration::from_millis(max_ms))
            }
            Err(_) => PollPolicy::fixed(max_attempts, interval),
        };

        Ok(Self {
            base_url: env_url("ZKL_PROVER_URL", DEFAULT_PROVER_URL)?,
            api_token: Zeroizing::new(api_token),
            program_id: std::env::var("ZKL_PROGRAM_ID")
                .unwrap_or_else(|_| DEFAULT_PROGRAM_ID.to_string()),
            callback_url: env_url_opt("ZKL_CALLBACK_URL")?,
            timeout_secs: env_parse("ZKL_TIMEOUT_SECS", 30)?,
            poll,
            status_ttl: Duration::from_secs(env_parse(
                "ZKL_STATUS_TTL_SECS",
                DEFAULT_STATUS_TTL.as_secs(),
            )?),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url(base_url)?,
            api_token: Zeroizing::new(token.to_string()),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            callback_url: None,
            timeout_secs: 5,
            poll: PollPolicy::default(),
            status_ttl: DEFAULT_STATUS_TTL,
        })
    }
}
