//! Individual decode stages.
//!
//! Each stage is a pure transformation of the raw parameter followed by a parse
//! against the target syntax. A stage never panics and never has side effects;
//! it yields either an [`Address`] or a [`StageFailure`] describing why it gave up.

use crate::address::{Address, AddressError, Syntax};
use crate::charset::Charset;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard RFC 4648 alphabet; `=` padding accepted but not required.
pub(crate) const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeStage {
    /// Parse the raw value as-is.
    DirectParse,
    /// Reverse `%XX` escapes, then parse.
    PercentDecode,
    /// Standard Base64 decode, then parse.
    Base64Decode,
}

/// Direct parse, then Base64.
pub const DIRECT_THEN_BASE64: [DecodeStage; 2] =
    [DecodeStage::DirectParse, DecodeStage::Base64Decode];

/// Direct parse, then percent-decoding, then Base64. The default order.
pub const PERCENT_BEFORE_BASE64: [DecodeStage; 3] = [
    DecodeStage::DirectParse,
    DecodeStage::PercentDecode,
    DecodeStage::Base64Decode,
];

/// Direct parse, then Base64, then percent-decoding.
pub const BASE64_BEFORE_PERCENT: [DecodeStage; 3] = [
    DecodeStage::DirectParse,
    DecodeStage::Base64Decode,
    DecodeStage::PercentDecode,
];

/// Options a stage reads from the call site's configuration.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub encoding: &'a str,
    pub plus_as_space: bool,
    pub syntax: Syntax,
}

/// Why a single stage did not produce an address. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageFailure {
    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("decoded octets are not valid {0}")]
    Unmappable(Charset),
    #[error(transparent)]
    Parse(#[from] AddressError),
}

impl DecodeStage {
    pub fn name(self) -> &'static str {
        match self {
            DecodeStage::DirectParse => "direct-parse",
            DecodeStage::PercentDecode => "percent-decode",
            DecodeStage::Base64Decode => "base64-decode",
        }
    }

    /// Runs this stage against `raw`.
    pub fn attempt(self, raw: &str, ctx: &StageContext<'_>) -> Result<Address, StageFailure> {
        match self {
            DecodeStage::DirectParse => Ok(ctx.syntax.parse(raw)?),
            DecodeStage::PercentDecode => {
                let charset = charset_for(ctx.encoding)?;
                let text = percent_decode(raw, charset, ctx.plus_as_space)?;
                Ok(ctx.syntax.parse(&text)?)
            }
            DecodeStage::Base64Decode => {
                let bytes = STANDARD_LENIENT.decode(raw)?;
                let charset = charset_for(ctx.encoding)?;
                let text = charset
                    .decode(&bytes)
                    .ok_or(StageFailure::Unmappable(charset))?;
                Ok(ctx.syntax.parse(&text)?)
            }
        }
    }
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecodeStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct-parse" => Ok(DecodeStage::DirectParse),
            "percent-decode" => Ok(DecodeStage::PercentDecode),
            "base64-decode" => Ok(DecodeStage::Base64Decode),
            other => Err(format!(
                "unknown stage {other:?} (expected direct-parse, percent-decode or base64-decode)"
            )),
        }
    }
}

fn charset_for(label: &str) -> Result<Charset, StageFailure> {
    Charset::for_label(label).ok_or_else(|| StageFailure::UnsupportedEncoding(label.to_owned()))
}

/// Reverses `%XX` escapes. Each run of consecutive escapes is decoded as text
/// in `charset`; unescaped chars are copied through (or `+` → space when
/// `plus_as_space`).
pub(crate) fn percent_decode(
    raw: &str,
    charset: Charset,
    plus_as_space: bool,
) -> Result<String, StageFailure> {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut pos = 0;

    while pos < raw.len() {
        if bytes[pos] == b'%' {
            let start = pos;
            while pos < raw.len() && bytes[pos] == b'%' {
                let escape_ok = pos + 2 < raw.len()
                    && bytes[pos + 1].is_ascii_hexdigit()
                    && bytes[pos + 2].is_ascii_hexdigit();
                if !escape_ok {
                    return Err(StageFailure::MalformedEscape(pos));
                }
                pos += 3;
            }
            let octets: Vec<u8> = percent_encoding::percent_decode_str(&raw[start..pos]).collect();
            let text = charset
                .decode(&octets)
                .ok_or(StageFailure::Unmappable(charset))?;
            out.push_str(&text);
        } else {
            let next = raw[pos..].find('%').map_or(raw.len(), |i| pos + i);
            let chunk = &raw[pos..next];
            if plus_as_space {
                out.extend(chunk.chars().map(|c| if c == '+' { ' ' } else { c }));
            } else {
                out.push_str(chunk);
            }
            pos = next;
        }
    }
    Ok(out)
}
