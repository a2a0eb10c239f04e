//! # zkl-celestia -- Typed JSON-RPC client for a Celestia node
//!
//! Publishes content identifiers as data-availability blobs and reads them
//! back:
//!
//! - **Submit** a CID under a namespace (`blob.Submit`), after a balance probe.
//! - **Retrieve** every blob at a height (`blob.GetAll`), decoding each one.
//! - **Verify** that a height carries an expected CID.
//!
//! The node is an external collaborator. This crate only speaks its
//! JSON-RPC 2.0 contract: every call is a POST to one endpoint with a bearer
//! token.

pub mod client;
pub mod config;
pub mod error;
pub mod namespace;
pub(crate) mod retry;
pub mod types;

pub use client::CelestiaClient;
pub use config::{CelestiaConfig, ConfigError};
pub use error::CelestiaError;
pub use namespace::{Namespace, DEFAULT_NAMESPACE};
pub use types::{Balance, BlobSet, BlobSubmission, BlobVerification, NodeInfo, RetrievedBlob};
