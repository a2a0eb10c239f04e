//! Prover network status probe and its cache.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use zkl_core::Timestamp;

use crate::client::ProverClient;

/// Snapshot of prover availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub circuits_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_info: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: Timestamp,
}

/// Probe `GET /status`. Never fails: errors yield an unavailable status.
pub async fn probe(client: &ProverClient) -> NetworkStatus {
    match client.network_info().await {
        Ok(info) => NetworkStatus {
            circuits_available: true,
            network_info: Some(info),
            error: None,
            checked_at: Timestamp::now(),
        },
        Err(e) => {
            tracing::warn!("prover status probe failed: {e}");
            NetworkStatus {
                circuits_available: false,
                network_info: None,
                error: Some(e.to_string()),
                checked_at: Timestamp::now(),
            }
        }
    }
}

/// Time-bounded cache for the last probe. Last write wins.
#[derive(Debug)]
pub struct StatusCache {
    ttl: Duration,
    entry: Mutex<Option<(Instant, NetworkStatus)>>,
}

impl StatusCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached status, if still fresh.
    pub fn get(&self) -> Option<NetworkStatus> {
        self.get_at(Instant::now())
    }

    pub fn put(&self, status: NetworkStatus) {
        self.put_at(Instant::now(), status);
    }

    pub fn clear(&self) {
        *self.entry.lock() = None;
    }

    fn get_at(&self, now: Instant) -> Option<NetworkStatus> {
        let guard = self.entry.lock();
        match guard.as_ref() {
            Some((stored, status)) if now.saturating_duration_since(*stored) < self.ttl => {
                Some(status.clone())
            }
            _ => None,
        }
    }

    fn put_at(&self, at: Instant, status: NetworkStatus) {
        *self.entry.lock() = Some((at, status));
    }
}
