//! Poll-until-resolved loop for submitted proof jobs.
//!
//! Queries the job status up to `max_attempts` times:
//!
//! - `completed` returns the payload at once; no further polls are made.
//! - `failed` is final and is not retried.
//! - Anything else (still pending, transport error, non-2xx, malformed body)
//!   consumes one attempt and waits for the backoff delay.
//!
//! Exhausting all attempts yields [`ProofError::Timeout`]. No delay follows
//! the final attempt. The cancel token is checked before every request and
//! raced against every delay.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::client::ProverClient;
use crate::error::ProofError;
use crate::types::{ProofHandle, ProofPayload, RemoteStatus};

/// Default number of status queries before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default delay between status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2_000);

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Wait `interval` every time.
    Fixed,
    /// Double from `interval` after each attempt, capped at `max`.
    Exponential { max: Duration },
}

/// How long and how often to poll.
///
/// At least one status query is always made: a `max_attempts` of zero is
/// treated as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl PollPolicy {
    /// Fixed delay between attempts.
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
            backoff: Backoff::Fixed,
        }
    }

    /// Exponential delay starting at `interval`, capped at `max`.
    pub fn exponential(max_attempts: u32, interval: Duration, max: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
            backoff: Backoff::Exponential { max },
        }
    }

    /// Delay after the zero-based attempt `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential { max } => {
                let factor = 2u32.saturating_pow(attempt);
                self.interval.saturating_mul(factor).min(max)
            }
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL)
    }
}

/// Where a polled job stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollState {
    Pending,
    Completed,
    Failed,
    TimedOut,
    Cancelled,
}

impl PollState {
    /// Terminal states are never left.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for PollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::TimedOut => "timed-out",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Single-use state machine for one job. Never shared between requests.
pub(crate) struct Poller<'a> {
    client: &'a ProverClient,
    handle: &'a ProofHandle,
    policy: PollPolicy,
    state: PollState,
    attempts: u32,
}

impl<'a> Poller<'a> {
    pub(crate) fn new(client: &'a ProverClient, handle: &'a ProofHandle, policy: PollPolicy) -> Self {
        Self {
            client,
            handle,
            policy: PollPolicy {
                max_attempts: policy.max_attempts.max(1),
                ..policy
            },
            state: PollState::Pending,
            attempts: 0,
        }
    }

    /// Drive the job to a terminal state.
    pub(crate) async fn run(mut self, cancel: &CancelToken) -> Result<ProofPayload, ProofError> {
        let request_id = self.handle.request_id.clone();
        tracing::info!(
            request_id = %request_id,
            max_attempts = self.policy.max_attempts,
            "polling for proof result"
        );

        while self.attempts < self.policy.max_attempts {
            if cancel.is_cancelled() {
                return Err(self.finish_cancelled());
            }

            let attempt = self.attempts;
            self.attempts += 1;

            match self.client.status(&request_id).await {
                Ok(resp) => match resp.remote_status() {
                    RemoteStatus::Completed => match resp.result {
                        Some(payload) => {
                            self.transition(PollState::Completed);
                            tracing::info!(
                                request_id = %request_id,
                                attempts = self.attempts,
                                "proof generation completed"
                            );
                            return Ok(payload);
                        }
                        None => tracing::warn!(
                            request_id = %request_id,
                            attempt = self.attempts,
                            "prover reported completed without a result, retrying"
                        ),
                    },
                    RemoteStatus::Failed => {
                        self.transition(PollState::Failed);
                        let reason = resp
                            .error
                            .unwrap_or_else(|| "no reason reported".to_string());
                        tracing::warn!(request_id = %request_id, %reason, "proof generation failed");
                        return Err(ProofError::Failed {
                            request_id: request_id.clone(),
                            reason,
                        });
                    }
                    RemoteStatus::InProgress => tracing::debug!(
                        request_id = %request_id,
                        attempt = self.attempts,
                        status = %resp.status,
                        "proof still in progress"
                    ),
                },
                Err(e) => tracing::warn!(
                    request_id = %request_id,
                    attempt = self.attempts,
                    max_attempts = self.policy.max_attempts,
                    "status poll failed: {e}"
                ),
            }

            if self.attempts < self.policy.max_attempts {
                let delay = self.policy.delay_after(attempt);
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = cancel.cancelled() => return Err(self.finish_cancelled()),
                }
            }
        }

        self.transition(PollState::TimedOut);
        tracing::warn!(
            request_id = %request_id,
            attempts = self.attempts,
            "timed out waiting for proof generation"
        );
        Err(ProofError::Timeout {
            request_id,
            attempts: self.attempts,
        })
    }

    fn finish_cancelled(&mut self) -> ProofError {
        self.transition(PollState::Cancelled);
        tracing::info!(
            request_id = %self.handle.request_id,
            attempts = self.attempts,
            "proof polling cancelled"
        );
        ProofError::Cancelled
    }

    fn transition(&mut self, next: PollState) {
        if self.state.is_terminal() {
            tracing::error!(from = %self.state, to = %next, "ignoring transition out of terminal state");
            return;
        }
        self.state = next;
    }
}
