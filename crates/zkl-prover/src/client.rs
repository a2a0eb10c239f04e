//! Typed HTTP client for the remote prover API.
//!
//! | Method | Path | Call |
//! |--------|------|------|
//! | POST | `/proofs/generate` | [`ProverClient::submit`] |
//! | GET  | `/proofs/{request_id}` | [`ProverClient::status`] |
//! | POST | `/proofs/verify` | [`ProverClient::verify`] |
//! | GET  | `/status` | [`ProverClient::network_info`] |
//!
//! Every call carries the bearer token as a default header. Calls are made
//! exactly once: retrying is the poll loop's job, not the client's.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;
use zkl_core::config::invalid_header_token;
use zkl_core::{RequestId, Timestamp};

use crate::config::{ConfigError, ProverConfig};
use crate::error::ProverApiError;
use crate::types::{
    GenerateProofRequest, GenerateProofResponse, ProofHandle, ProofInputs, ProofRequest,
    ProofStatusResponse, VerifyProofRequest, VerifyProofResponse,
};

/// Client for the prover API.
#[derive(Debug, Clone)]
pub struct ProverClient {
    http: reqwest::Client,
    base_url: Url,
    program_id: String,
    callback_url: Option<Url>,
}

impl ProverClient {
    /// Create a new prover client from configuration.
    pub fn new(config: &ProverConfig) -> Result<Self, ProverApiError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                config.base_url.to_string(),
                "not usable as an API root".into(),
            )
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_token.as_str()
                    ))
                    .map_err(|_| invalid_header_token("ZKL_PROVER_TOKEN"))?,
                );
                headers
            })
            .build()
            .map_err(|e| ProverApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            program_id: config.program_id.clone(),
            callback_url: config.callback_url.clone(),
        })
    }

    /// The program id sent with generate and verify calls.
    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    /// Submit a proof-generation job.
    ///
    /// Calls `POST {base_url}/proofs/generate`.
    pub async fn submit(&self, request: &ProofRequest) -> Result<ProofHandle, ProverApiError> {
        let endpoint = "POST /proofs/generate";
        let url = self.endpoint(&["proofs", "generate"])?;

        if request.secret().is_empty() {
            tracing::warn!(
                content_id = %request.identifier(),
                "submitting proof request with an empty secret"
            );
        }

        let body = GenerateProofRequest {
            program_id: &self.program_id,
            inputs: ProofInputs {
                ipfs_hash: request.identifier().as_str(),
                hash_value: request.field_value().to_string(),
                secret: request.secret(),
            },
            callback_url: self.callback_url.as_ref().map(Url::as_str),
        };

        tracing::info!(
            content_id = %request.identifier(),
            hash_value = %request.field_value(),
            secret_len = request.secret().len(),
            "requesting proof generation"
        );

        let resp: GenerateProofResponse = self
            .send_json(self.http.post(url).json(&body), endpoint)
            .await?;

        let request_id =
            RequestId::new(resp.request_id).map_err(|e| ProverApiError::InvalidResponse {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            })?;

        tracing::info!(request_id = %request_id, "proof generation requested");
        Ok(ProofHandle {
            request_id,
            submitted_at: Timestamp::now(),
        })
    }

    /// Fetch the status of a submitted job.
    ///
    /// Calls `GET {base_url}/proofs/{request_id}`.
    pub async fn status(
        &self,
        request_id: &RequestId,
    ) -> Result<ProofStatusResponse, ProverApiError> {
        let endpoint = "GET /proofs/{request_id}";
        let url = self.endpoint(&["proofs", request_id.as_str()])?;
        self.send_json(self.http.get(url), endpoint).await
    }

    /// Ask the prover to verify a proof against its public inputs.
    ///
    /// Calls `POST {base_url}/proofs/verify`. Returns the verifier's verdict
    /// unchanged; transport and status failures are errors, not `false`.
    pub async fn verify(
        &self,
        proof: &serde_json::Value,
        public_inputs: &[String],
    ) -> Result<bool, ProverApiError> {
        let endpoint = "POST /proofs/verify";
        let url = self.endpoint(&["proofs", "verify"])?;
        let body = VerifyProofRequest {
            program_id: &self.program_id,
            proof,
            public_inputs,
        };

        let resp: VerifyProofResponse = self
            .send_json(self.http.post(url).json(&body), endpoint)
            .await?;
        tracing::debug!(valid = resp.valid, "verification result received");
        Ok(resp.valid)
    }

    /// Fetch the prover network's self-reported status.
    ///
    /// Calls `GET {base_url}/status`.
    pub async fn network_info(&self) -> Result<serde_json::Value, ProverApiError> {
        let endpoint = "GET /status";
        let url = self.endpoint(&["status"])?;
        self.send_json(self.http.get(url), endpoint).await
    }

    /// Resolve `segments` beneath the API root, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProverApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(
                    self.base_url.to_string(),
                    "not usable as an API root".into(),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode a 2xx JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ProverApiError> {
        let resp = request.send().await.map_err(|e| ProverApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProverApiError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| ProverApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ProverClient {
        let config = ProverConfig::local_mock(base, "test-token").unwrap();
        ProverClient::new(&config).unwrap()
    }

    #[test]
    fn endpoint_appends_under_base_path() {
        let c = client("https://api.example.com/api");
        let url = c.endpoint(&["proofs", "generate"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/proofs/generate");
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let c = client("https://api.example.com/api/");
        let url = c.endpoint(&["status"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/status");
    }

    #[test]
    fn endpoint_encodes_request_id() {
        let c = client("http://127.0.0.1:9000");
        let url = c.endpoint(&["proofs", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proofs/a%2Fb%20c");
    }

    #[test]
    fn rejects_token_with_invalid_header_chars() {
        let config = ProverConfig::local_mock("http://127.0.0.1:9000", "bad\ntoken").unwrap();
        let err = ProverClient::new(&config).unwrap_err();
        assert!(matches!(
            err,
            ProverApiError::Config(ConfigError::InvalidValue(ref var, _)) if var == "ZKL_PROVER_TOKEN"
        ));
        assert!(!err.to_string().contains("is required"));
    }
}
