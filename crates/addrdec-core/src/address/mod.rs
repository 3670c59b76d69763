//! Address syntaxes and the parsed address value.
//!
//! An [`Address`] only exists if its text parsed against the requested
//! [`Syntax`]. The recovered text is kept verbatim; the parsed form is exposed
//! alongside it so callers can inspect host, path, etc.

mod uri;

pub use uri::{Component, UriError, UriRef};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target grammar for a decoded parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// Absolute URL (must carry a scheme).
    #[default]
    Url,
    /// RFC 3986 URI reference; relative references allowed.
    Uri,
}

impl Syntax {
    pub fn name(self) -> &'static str {
        match self {
            Syntax::Url => "url",
            Syntax::Uri => "uri",
        }
    }

    /// Parses `text` against this syntax.
    pub fn parse(self, text: &str) -> Result<Address, AddressError> {
        match self {
            Syntax::Url => {
                let url = url::Url::parse(text)?;
                Ok(Address::Url {
                    text: text.to_owned(),
                    url,
                })
            }
            Syntax::Uri => Ok(Address::Uri(UriRef::parse(text)?)),
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Syntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "url" => Ok(Syntax::Url),
            "uri" => Ok(Syntax::Uri),
            other => Err(format!("unknown syntax {other:?} (expected url or uri)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("not a valid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("not a valid URI: {0}")]
    Uri(#[from] UriError),
}

/// A successfully parsed address, tagged by the syntax it was parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    Url { text: String, url: url::Url },
    Uri(UriRef),
}

impl Address {
    /// The decoded text exactly as recovered, without normalization.
    pub fn as_str(&self) -> &str {
        match self {
            Address::Url { text, .. } => text,
            Address::Uri(uri) => uri.as_str(),
        }
    }

    pub fn syntax(&self) -> Syntax {
        match self {
            Address::Url { .. } => Syntax::Url,
            Address::Uri(_) => Syntax::Uri,
        }
    }

    pub fn as_url(&self) -> Option<&url::Url> {
        match self {
            Address::Url { url, .. } => Some(url),
            Address::Uri(_) => None,
        }
    }

    pub fn as_uri(&self) -> Option<&UriRef> {
        match self {
            Address::Url { .. } => None,
            Address::Uri(uri) => Some(uri),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Address::Url { text, .. } => text,
            Address::Uri(uri) => uri.into_string(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_keeps_original_text() {
        let addr = Syntax::Url.parse("http://example.com?x=1").unwrap();
        assert_eq!(addr.as_str(), "http://example.com?x=1");
        assert_eq!(addr.syntax(), Syntax::Url);
        let url = addr.as_url().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn url_requires_scheme() {
        assert_eq!(
            Syntax::Url.parse("/a/b?c=d"),
            Err(AddressError::Url(url::ParseError::RelativeUrlWithoutBase))
        );
        assert!(Syntax::Url.parse("").is_err());
    }

    #[test]
    fn uri_accepts_relative_reference() {
        let addr = Syntax::Uri.parse("/a/b?c=d").unwrap();
        assert_eq!(addr.syntax(), Syntax::Uri);
        assert!(addr.as_uri().unwrap().is_relative());
        assert!(addr.as_url().is_none());
        assert_eq!(addr.to_string(), "/a/b?c=d");
    }

    #[test]
    fn garbage_rejected_by_both() {
        assert!(Syntax::Url.parse("<script>bad</script>").is_err());
        assert!(Syntax::Uri.parse("<script>bad</script>").is_err());
    }

    #[test]
    fn syntax_from_str() {
        assert_eq!("URL".parse::<Syntax>(), Ok(Syntax::Url));
        assert_eq!("uri".parse::<Syntax>(), Ok(Syntax::Uri));
        assert!("urn".parse::<Syntax>().is_err());
    }
}
