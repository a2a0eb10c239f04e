//! # Identifier Newtypes
//!
//! `ContentId` names stored content (an IPFS CID); `RequestId` names a proof
//! job on the remote prover. Keeping them distinct stops a CID from being
//! polled as a job or a job id from being hashed into a circuit input.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::{field_hash, FieldElement};

/// Content identifier, typically an IPFS CID such as `Qm...` or `bafy...`.
///
/// Non-empty and free of whitespace. The format is otherwise opaque: CID
/// versions and multibase prefixes are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Validate and wrap a content identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidIdentifier(
                "content id must not be empty".into(),
            ));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidIdentifier(format!(
                "content id must not contain whitespace: {id:?}"
            )));
        }
        Ok(Self(id))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Field value of this identifier's UTF-8 bytes.
    pub fn field_value(&self) -> FieldElement {
        field_hash(self.0.as_bytes())
    }
}

impl TryFrom<String> for ContentId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl std::str::FromStr for ContentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier the prover assigns to a proof-generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestId(String);

impl RequestId {
    /// Wrap a prover request id. Must be non-empty.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::InvalidIdentifier(
                "request id must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequestId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RequestId> for String {
    fn from(value: RequestId) -> Self {
        value.0
    }
}

impl std::str::FromStr for RequestId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
