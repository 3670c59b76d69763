//! Character encodings used to turn decoded octets back into text.
//!
//! Only the encodings a URL parameter realistically travels in are supported.
//! Decoding is strict: octets that are not valid in the encoding fail instead
//! of being replaced.

use std::fmt;

/// Default encoding: single-byte Latin-1, so every octet maps to exactly one char.
pub const DEFAULT_ENCODING: &str = "ISO-8859-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Latin1,
    Utf8,
    Ascii,
}

impl Charset {
    /// Looks up an encoding by label (case-insensitive). Returns `None` for
    /// labels this crate does not support.
    pub fn for_label(label: &str) -> Option<Charset> {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "iso-latin-1" | "latin1" | "l1" => {
                Some(Charset::Latin1)
            }
            "utf-8" | "utf8" => Some(Charset::Utf8),
            "us-ascii" | "ascii" => Some(Charset::Ascii),
            _ => None,
        }
    }

    /// Canonical name, as written back into config files.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Latin1 => "ISO-8859-1",
            Charset::Utf8 => "UTF-8",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Decodes `bytes` as text in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Charset::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Charset::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Charset::Ascii => {
                if bytes.is_ascii() {
                    Some(bytes.iter().map(|&b| b as char).collect())
                } else {
                    None
                }
            }
        }
    }

    /// Encodes `text` in this encoding. Returns `None` if a char has no
    /// representation (e.g. `€` in Latin-1).
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
            Charset::Utf8 => Some(text.as_bytes().to_vec()),
            Charset::Ascii => {
                if text.is_ascii() {
                    Some(text.as_bytes().to_vec())
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
