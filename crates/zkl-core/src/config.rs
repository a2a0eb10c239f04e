//! Environment-variable readers shared by the client configurations.
//!
//! Unset variables fall back to a default; set but unparsable ones are
//! errors, never silently replaced.

use url::Url;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingToken(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Read a required, non-blank credential.
pub fn env_token(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(ConfigError::MissingToken(var.to_string())),
    }
}

/// Read a URL, using `default` when unset.
pub fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Read an optional URL.
pub fn env_url_opt(var: &str) -> Result<Option<Url>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => Url::parse(&raw)
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string())),
        Err(_) => Ok(None),
    }
}

/// Read and parse a value, using `default` when unset.
pub fn env_parse<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(var.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse an explicitly supplied URL (no environment lookup).
pub fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))
}

/// Error for a credential that cannot be sent as an HTTP header value.
pub fn invalid_header_token(var: &str) -> ConfigError {
    ConfigError::InvalidValue(
        var.to_string(),
        "contains characters not allowed in a header".to_string(),
    )
}
