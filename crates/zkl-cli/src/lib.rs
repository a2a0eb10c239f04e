//! # zkl-cli — Command-Line Interface for zkl
//!
//! Provides the `zkl` binary.
//!
//! ## Subcommands
//!
//! - `zkl hash` — Field value of a content identifier.
//! - `zkl codec` — Hex and base64 encoding of text.
//! - `zkl prove` — Request a proof, falling back unless `--strict`.
//! - `zkl verify` — Verify a saved proof result.
//! - `zkl proof-status` — One status check of a job from `prove --no-wait`.
//! - `zkl status` — Prover network status.
//! - `zkl blob` — Celestia blob submit, get, and verify.
//!
//! ```bash
//! zkl hash QmTestCID123
//! zkl prove --cid QmTestCID123 --secret s3cret > proof.json
//! zkl verify --cid QmTestCID123 --proof proof.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; protocol logic lives in the library crates.
//! - Results go to stdout as JSON or plain text; logs go to stderr.
//! - Handlers return the process exit code.

pub mod blob;
pub mod codec;
pub mod hash;
pub mod proof;

use anyhow::{Context, Result};
use serde::Serialize;

/// Exit code for a completed check that came out negative.
pub const EXIT_INVALID: u8 = 2;

/// Print `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
