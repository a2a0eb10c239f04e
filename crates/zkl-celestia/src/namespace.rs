//! Blob namespaces.
//!
//! On the wire a namespace is `0x` followed by lowercase hex. Human-readable
//! names such as `zkl-ipfs` are converted by hex-encoding their UTF-8 bytes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use zkl_core::codec;

use crate::error::CelestiaError;

/// Name of the namespace this application writes to by default.
pub const DEFAULT_NAMESPACE: &str = "zkl-ipfs";

const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 8;

/// A blob namespace in `0x`-hex form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Parse a namespace.
    ///
    /// `0x`-prefixed input must be valid, non-empty hex and is normalized to
    /// lowercase. Anything else is treated as a name and hex-encoded.
    pub fn parse(s: &str) -> Result<Self, CelestiaError> {
        if let Some(digits) = s.strip_prefix("0x") {
            if digits.is_empty() {
                return Err(CelestiaError::InvalidInput("namespace hex is empty".into()));
            }
            codec::from_hex(digits).map_err(|e| {
                CelestiaError::InvalidInput(format!("namespace {s:?} is not valid hex: {e}"))
            })?;
            return Ok(Self(format!("0x{}", digits.to_ascii_lowercase())));
        }
        Self::from_name(s)
    }

    /// Hex-encode a human-readable name.
    pub fn from_name(name: &str) -> Result<Self, CelestiaError> {
        if name.is_empty() {
            return Err(CelestiaError::InvalidInput("namespace must not be empty".into()));
        }
        Ok(Self(format!("0x{}", codec::to_hex(name))))
    }

    /// `zkl-ipfs-{seed}`, or `zkl-ipfs-` plus 8 random lowercase
    /// alphanumerics when no seed is given.
    pub fn unique(seed: Option<&str>) -> Result<Self, CelestiaError> {
        let suffix = match seed {
            Some(seed) if !seed.is_empty() => seed.to_string(),
            _ => random_suffix(),
        };
        Self::from_name(&format!("{DEFAULT_NAMESPACE}-{suffix}"))
    }

    /// The `0x`-hex wire form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace name, if its bytes are UTF-8.
    pub fn name(&self) -> Option<String> {
        let bytes = codec::from_hex(&self.0).ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(format!("0x{}", codec::to_hex(DEFAULT_NAMESPACE)))
    }
}

impl TryFrom<String> for Namespace {
    type Error = CelestiaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

impl std::str::FromStr for Namespace {
    type Err = CelestiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())]))
        .collect()
}
