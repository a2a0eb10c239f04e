//! # Error Types
//!
//! Error types for the leaf primitives. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations; higher crates wrap
//! them in their own enums.

use thiserror::Error;

/// Top-level error type for `zkl-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Encoding or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A value is not a canonical field element.
    #[error("field element error: {0}")]
    Field(String),

    /// A timestamp could not be parsed or constructed.
    #[error("timestamp error: {0}")]
    Timestamp(String),
}

/// Error while converting between bytes and their text encodings.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Input is not valid standard base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8.
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
