//! JSON-RPC client for a Celestia node.
//!
//! | Method | Call | Retried |
//! |--------|------|---------|
//! | `node.Info` | [`CelestiaClient::node_info`] | yes |
//! | `state.Balance` | [`CelestiaClient::balance`] | yes |
//! | `blob.Submit` | [`CelestiaClient::submit`] | no |
//! | `blob.GetAll` | [`CelestiaClient::get_all`] | yes |
//!
//! Blob data is sent as padded base64 of the content id's UTF-8 bytes.
//! Retrieved data is decoded leniently (hex, base64, raw) so blobs written
//! in other encodings still read back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;
use zkl_core::config::invalid_header_token;
use zkl_core::{codec, BlobPayload, ContentId, Timestamp};

use crate::config::CelestiaConfig;
use crate::error::CelestiaError;
use crate::namespace::Namespace;
use crate::retry::retry_send;
use crate::types::{
    Balance, BlobSet, BlobSubmission, BlobVerification, NodeInfo, RetrievedBlob, RpcRequest,
    RpcResponse, SubmitBlob, WireBlob,
};

/// Block explorer used for submission links.
pub const EXPLORER_BASE: &str = "https://celenium.io";

/// Client for one Celestia node's JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct CelestiaClient {
    http: reqwest::Client,
    rpc_url: Url,
    gas_price: f64,
    read_retries: u32,
    next_id: Arc<AtomicU64>,
}

impl CelestiaClient {
    /// Create a new client from configuration.
    pub fn new(config: &CelestiaConfig) -> Result<Self, CelestiaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.auth_token.as_str()
                    ))
                    .map_err(|_| invalid_header_token("ZKL_CELESTIA_TOKEN"))?,
                );
                headers
            })
            .build()
            .map_err(|e| CelestiaError::Http {
                method: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            gas_price: config.gas_price,
            read_retries: config.read_retries,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Node version and type.
    pub async fn node_info(&self) -> Result<NodeInfo, CelestiaError> {
        let info = self.call("node.Info", json!([]), true).await?;
        required("node.Info", info)
    }

    /// Balance of the node's signing account.
    pub async fn balance(&self) -> Result<Balance, CelestiaError> {
        let balance = self.call("state.Balance", json!([]), true).await?;
        required("state.Balance", balance)
    }

    /// Publish `content_id` as a blob under `namespace`.
    ///
    /// The account balance is probed first: a balance that parses to zero
    /// or less aborts with [`CelestiaError::InsufficientBalance`]. A failed
    /// probe is logged and the submission goes ahead.
    pub async fn submit(
        &self,
        content_id: &ContentId,
        namespace: &Namespace,
    ) -> Result<BlobSubmission, CelestiaError> {
        match self.balance().await {
            Ok(balance) if balance.is_depleted() => {
                tracing::warn!(amount = %balance.amount, denom = %balance.denom, "Celestia account balance depleted");
                return Err(CelestiaError::InsufficientBalance(format!(
                    "balance is {} {}",
                    balance.amount, balance.denom
                )));
            }
            Ok(balance) => {
                tracing::debug!(amount = %balance.amount, denom = %balance.denom, "balance check passed")
            }
            Err(e) => tracing::warn!("could not check Celestia balance, submitting anyway: {e}"),
        }

        let blob = SubmitBlob {
            namespace: namespace.as_str(),
            data: codec::to_base64(content_id.as_str()),
            share_version: 0,
        };
        tracing::info!(
            content_id = %content_id,
            namespace = %namespace,
            "submitting blob to Celestia"
        );

        let height: Option<u64> = self
            .call("blob.Submit", json!([[blob], self.gas_price]), false)
            .await
            .map_err(|e| match e {
                CelestiaError::Rpc { ref message, .. } if e.is_insufficient_balance() => {
                    CelestiaError::InsufficientBalance(message.clone())
                }
                other => other,
            })?;
        let height = required("blob.Submit", height)?;

        tracing::info!(height, namespace = %namespace, "blob included");
        Ok(BlobSubmission {
            height,
            namespace: namespace.clone(),
            content_id: content_id.clone(),
            explorer_url: format!("{EXPLORER_BASE}/{height}/{namespace}"),
            submitted_at: Timestamp::now(),
        })
    }

    /// Fetch and decode every blob at `height` in `namespace`.
    pub async fn get_all(
        &self,
        height: u64,
        namespace: &Namespace,
    ) -> Result<BlobSet, CelestiaError> {
        if height == 0 {
            return Err(CelestiaError::InvalidInput(
                "block height must be at least 1".into(),
            ));
        }

        let blobs: Option<Vec<WireBlob>> = self
            .call("blob.GetAll", json!([height, namespace.as_str()]), true)
            .await?;
        let blobs = blobs.unwrap_or_default();
        if blobs.is_empty() {
            return Err(CelestiaError::NotFound {
                height,
                namespace: namespace.to_string(),
            });
        }

        let blobs = blobs
            .into_iter()
            .map(|b| RetrievedBlob {
                payload: BlobPayload::decode_lenient(&b.data),
                namespace: b.namespace,
                commitment: b.commitment,
            })
            .collect::<Vec<_>>();
        tracing::debug!(height, count = blobs.len(), "blobs retrieved");

        Ok(BlobSet {
            height,
            namespace: namespace.clone(),
            blobs,
            retrieved_at: Timestamp::now(),
        })
    }

    /// Check whether a blob at `height` carries `expected`.
    ///
    /// Never fails: retrieval errors come back as `is_valid: false` with the
    /// error text.
    pub async fn verify_content(
        &self,
        height: u64,
        expected: &ContentId,
        namespace: &Namespace,
    ) -> BlobVerification {
        let (is_valid, error) = match self.get_all(height, namespace).await {
            Ok(set) if set.contains(expected.as_str()) => (true, None),
            Ok(_) => (
                false,
                Some(format!("content id {expected} not found in blob data")),
            ),
            Err(e) => {
                tracing::warn!(height, namespace = %namespace, "blob verification failed: {e}");
                (false, Some(e.to_string()))
            }
        };

        BlobVerification {
            is_valid,
            height,
            namespace: namespace.clone(),
            error,
            checked_at: Timestamp::now(),
        }
    }

    /// Issue one JSON-RPC call and unwrap its envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
        idempotent: bool,
    ) -> Result<Option<T>, CelestiaError> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let retries = if idempotent { self.read_retries } else { 0 };

        let resp = retry_send(method, retries, || {
            self.http.post(self.rpc_url.clone()).json(&body).send()
        })
        .await
        .map_err(|e| CelestiaError::Http {
            method: method.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CelestiaError::ApiError {
                method: method.into(),
                status,
                body,
            });
        }

        let envelope: RpcResponse<T> =
            resp.json()
                .await
                .map_err(|e| CelestiaError::Deserialization {
                    method: method.into(),
                    source: e,
                })?;

        if let Some(err) = envelope.error {
            return Err(CelestiaError::Rpc {
                method: method.into(),
                code: err.code,
                message: err.message,
            });
        }
        Ok(envelope.result)
    }
}

fn required<T>(method: &str, value: Option<T>) -> Result<T, CelestiaError> {
    value.ok_or_else(|| CelestiaError::EmptyResponse {
        method: method.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn request_ids_increase() {
        let config = CelestiaConfig::local_mock("http://127.0.0.1:26658", "tok").unwrap();
        let client = CelestiaClient::new(&config).unwrap();
        let a = client.next_id.fetch_add(1, Ordering::Relaxed);
        let b = client.clone().next_id.fetch_add(1, Ordering::Relaxed);
        assert!(b > a);
    }

    #[test]
    fn rejects_token_with_invalid_header_chars() {
        let config = CelestiaConfig::local_mock("http://127.0.0.1:26658", "bad\ntoken").unwrap();
        let err = CelestiaClient::new(&config).unwrap_err();
        assert!(matches!(
            err,
            CelestiaError::Config(ConfigError::InvalidValue(ref var, _)) if var == "ZKL_CELESTIA_TOKEN"
        ));
        assert!(!err.to_string().contains("is required"));
    }

    #[test]
    fn required_maps_missing_result() {
        assert!(matches!(
            required::<u64>("blob.Submit", None),
            Err(CelestiaError::EmptyResponse { .. })
        ));
        assert_eq!(required("blob.Submit", Some(7u64)).unwrap(), 7);
    }
}
