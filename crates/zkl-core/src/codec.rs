//! # Binary ⇄ Text Codecs
//!
//! Hex and base64 conversions used on the wire to Celestia and in the CLI.
//! Encoding is delegated to the `hex` and `base64` crates.
//!
//! Base64 is the standard alphabet. Encoding always pads; decoding accepts
//! input with or without trailing `=`, since blobs written by older clients
//! were stripped of padding.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Lowercase hex of `bytes`, no prefix.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decode hex, with or without a `0x` prefix.
pub fn from_hex(s: &str) -> Result<Vec<u8>, CodecError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Ok(hex::decode(digits)?)
}

/// Padded standard base64 of `bytes`.
pub fn to_base64(bytes: impl AsRef<[u8]>) -> String {
    BASE64.encode(bytes)
}

/// Decode standard base64, padding optional.
pub fn from_base64(s: &str) -> Result<Vec<u8>, CodecError> {
    Ok(BASE64.decode(s)?)
}

/// A text encoding for binary payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Lowercase hexadecimal.
    Hex,
    /// Padded standard base64.
    Base64,
}

impl TextEncoding {
    /// Encode the UTF-8 bytes of `text`.
    pub fn encode_text(self, text: &str) -> String {
        match self {
            Self::Hex => to_hex(text),
            Self::Base64 => to_base64(text),
        }
    }

    /// Decode `encoded` and require the result to be UTF-8.
    pub fn decode_text(self, encoded: &str) -> Result<String, CodecError> {
        let bytes = match self {
            Self::Hex => from_hex(encoded)?,
            Self::Base64 => from_base64(encoded)?,
        };
        Ok(String::from_utf8(bytes)?)
    }

    /// Returns the encoding name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text payload recovered from an encoded blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobPayload {
    /// Decoded text.
    pub raw: String,
    /// `raw` parsed as JSON, when it is JSON.
    pub parsed: Option<serde_json::Value>,
    /// The encoding the payload arrived in; `None` when taken verbatim.
    pub encoding: Option<TextEncoding>,
}

impl BlobPayload {
    /// Decode blob data whose encoding is not known up front.
    ///
    /// Order of attempts: `0x`-prefixed hex, then base64, then the text
    /// itself. A decoding only counts if it yields UTF-8. Never fails.
    pub fn decode_lenient(data: &str) -> Self {
        let decoded = if data.starts_with("0x") {
            TextEncoding::Hex
                .decode_text(data)
                .ok()
                .map(|text| (text, TextEncoding::Hex))
        } else {
            TextEncoding::Base64
                .decode_text(data)
                .ok()
                .map(|text| (text, TextEncoding::Base64))
        };

        let (raw, encoding) = match decoded {
            Some((text, encoding)) => (text, Some(encoding)),
            None => (data.to_string(), None),
        };
        let parsed = serde_json::from_str(&raw).ok();
        Self {
            raw,
            parsed,
            encoding,
        }
    }
}
