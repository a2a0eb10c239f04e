//! Celestia node API types.
//!
//! Wire structs mirror the node's JSON; result structs are what this crate
//! hands back to callers.

use serde::{Deserialize, Serialize};
use zkl_core::{BlobPayload, ContentId, Timestamp};

use crate::namespace::Namespace;

// -- JSON-RPC envelope --------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

// -- Node API -----------------------------------------------------------------

/// `node.Info` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub api_version: String,
    #[serde(rename = "type", default)]
    pub node_type: u32,
}

/// `state.Balance` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub denom: String,
}

impl Balance {
    /// The amount as an integer, if it parses.
    pub fn amount_value(&self) -> Option<i128> {
        self.amount.trim().parse().ok()
    }

    /// Whether the amount parses to zero or less. Unparsable amounts are
    /// not treated as empty.
    pub fn is_depleted(&self) -> bool {
        self.amount_value().is_some_and(|v| v <= 0)
    }
}

/// A blob as sent to `blob.Submit`.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitBlob<'a> {
    pub namespace: &'a str,
    pub data: String,
    pub share_version: u32,
}

/// A blob as returned by `blob.GetAll`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireBlob {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub commitment: Option<String>,
}

// -- Results ------------------------------------------------------------------

/// A confirmed blob submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobSubmission {
    pub height: u64,
    pub namespace: Namespace,
    pub content_id: ContentId,
    pub explorer_url: String,
    pub submitted_at: Timestamp,
}

/// One decoded blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedBlob {
    pub payload: BlobPayload,
    pub namespace: Option<String>,
    pub commitment: Option<String>,
}

/// All blobs at a height in a namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobSet {
    pub height: u64,
    pub namespace: Namespace,
    pub blobs: Vec<RetrievedBlob>,
    pub retrieved_at: Timestamp,
}

impl BlobSet {
    /// Whether any blob's decoded text contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.blobs.iter().any(|b| b.payload.raw.contains(needle))
    }
}

/// Outcome of checking a height for an expected content id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobVerification {
    pub is_valid: bool,
    pub height: u64,
    pub namespace: Namespace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: Timestamp,
}
