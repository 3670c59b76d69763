//! Encoders producing parameters the decode stages accept.

use crate::charset::Charset;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters gets escaped.
const PARAMETER: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("text is not representable in {0}")]
    Unrepresentable(Charset),
}

fn encode_text(text: &str, encoding: &str) -> Result<Vec<u8>, EncodeError> {
    let charset = Charset::for_label(encoding)
        .ok_or_else(|| EncodeError::UnsupportedEncoding(encoding.to_owned()))?;
    charset
        .encode(text)
        .ok_or(EncodeError::Unrepresentable(charset))
}

/// Percent-encodes `text` in `encoding`.
pub fn percent_encode(text: &str, encoding: &str) -> Result<String, EncodeError> {
    let bytes = encode_text(text, encoding)?;
    Ok(percent_encoding::percent_encode(&bytes, PARAMETER).to_string())
}

/// Base64-encodes `text` in `encoding` (standard alphabet, padded).
pub fn base64_encode(text: &str, encoding: &str) -> Result<String, EncodeError> {
    let bytes = encode_text(text, encoding)?;
    Ok(STANDARD.encode(bytes))
}
