//! RFC 3986 URI-reference validation.
//!
//! Splits a reference into components with the Appendix B grammar, then checks
//! each component against its allowed character set. Nothing is normalized or
//! escaped: a reference either is valid as written or is rejected.

use std::fmt;
use std::ops::Range;

/// Component of a URI reference, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Scheme,
    Authority,
    Path,
    Query,
    Fragment,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Scheme => "scheme",
            Component::Authority => "authority",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("empty URI reference")]
    Empty,
    #[error("invalid scheme")]
    InvalidScheme,
    #[error("invalid character {ch:?} in {component} at byte {position}")]
    InvalidCharacter {
        component: Component,
        ch: char,
        position: usize,
    },
    #[error("malformed percent escape at byte {position}")]
    InvalidPercentEncoding { position: usize },
    #[error("invalid port")]
    InvalidPort,
    #[error("unterminated IP literal")]
    InvalidIpLiteral,
}

/// A syntactically valid URI reference (absolute URI or relative reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriRef {
    text: String,
    scheme: Option<Range<usize>>,
    authority: Option<Range<usize>>,
    path: Range<usize>,
    query: Option<Range<usize>>,
    fragment: Option<Range<usize>>,
}

impl UriRef {
    pub fn parse(input: &str) -> Result<UriRef, UriError> {
        if input.is_empty() {
            return Err(UriError::Empty);
        }

        let (before_fragment, fragment) = match input.find('#') {
            Some(i) => (i, Some(i + 1..input.len())),
            None => (input.len(), None),
        };
        let (before_query, query) = match input[..before_fragment].find('?') {
            Some(i) => (i, Some(i + 1..before_fragment)),
            None => (before_fragment, None),
        };

        let hier = &input[..before_query];
        let scheme = match hier.find(|c: char| c == ':' || c == '/') {
            Some(i) if hier.as_bytes()[i] == b':' => Some(0..i),
            _ => None,
        };
        let mut cursor = scheme.as_ref().map_or(0, |s| s.end + 1);

        let authority = if input[cursor..before_query].starts_with("//") {
            let start = cursor + 2;
            let end = input[start..before_query]
                .find('/')
                .map_or(before_query, |i| start + i);
            cursor = end;
            Some(start..end)
        } else {
            None
        };
        let path = cursor..before_query;

        let uri = UriRef {
            text: input.to_owned(),
            scheme,
            authority,
            path,
            query,
            fragment,
        };
        uri.validate()?;
        Ok(uri)
    }

    fn validate(&self) -> Result<(), UriError> {
        if let Some(range) = &self.scheme {
            validate_scheme(&self.text[range.clone()])?;
        }
        if let Some(range) = &self.authority {
            validate_authority(&self.text, range.clone())?;
        }
        validate_chars(&self.text, self.path.clone(), Component::Path, is_path_char)?;
        if let Some(range) = &self.query {
            validate_chars(&self.text, range.clone(), Component::Query, is_query_char)?;
        }
        if let Some(range) = &self.fragment {
            validate_chars(&self.text, range.clone(), Component::Fragment, is_query_char)?;
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.clone().map(|r| &self.text[r])
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.clone().map(|r| &self.text[r])
    }

    pub fn path(&self) -> &str {
        &self.text[self.path.clone()]
    }

    pub fn query(&self) -> Option<&str> {
        self.query.clone().map(|r| &self.text[r])
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.clone().map(|r| &self.text[r])
    }

    /// True for relative references (no scheme).
    pub fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn validate_scheme(scheme: &str) -> Result<(), UriError> {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(UriError::InvalidScheme),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Ok(())
    } else {
        Err(UriError::InvalidScheme)
    }
}

/// authority = [ userinfo "@" ] host [ ":" port ]
fn validate_authority(text: &str, range: Range<usize>) -> Result<(), UriError> {
    let authority = &text[range.clone()];
    let (userinfo_len, host_start) = match authority.rfind('@') {
        Some(i) => (Some(i), range.start + i + 1),
        None => (None, range.start),
    };
    if let Some(len) = userinfo_len {
        validate_chars(text, range.start..range.start + len, Component::Authority, |c| {
            is_unreserved(c) || is_sub_delim(c) || c == ':'
        })?;
    }

    let host_port = &text[host_start..range.end];
    let port_start = if host_port.starts_with('[') {
        let close = host_port.find(']').ok_or(UriError::InvalidIpLiteral)?;
        validate_chars(
            text,
            host_start + 1..host_start + close,
            Component::Authority,
            |c| c.is_ascii_hexdigit() || is_unreserved(c) || is_sub_delim(c) || c == ':',
        )?;
        let after = host_start + close + 1;
        match text[after..range.end].chars().next() {
            None => None,
            Some(':') => Some(after + 1),
            Some(_) => return Err(UriError::InvalidIpLiteral),
        }
    } else {
        let (end, port) = match host_port.rfind(':') {
            Some(i) => (host_start + i, Some(host_start + i + 1)),
            None => (range.end, None),
        };
        validate_chars(text, host_start..end, Component::Authority, |c| {
            is_unreserved(c) || is_sub_delim(c)
        })?;
        port
    };

    if let Some(start) = port_start {
        if !text[start..range.end].bytes().all(|b| b.is_ascii_digit()) {
            return Err(UriError::InvalidPort);
        }
    }
    Ok(())
}

/// Checks every char in `range` against `allowed`, accepting `%XX` escapes.
fn validate_chars(
    text: &str,
    range: Range<usize>,
    component: Component,
    allowed: impl Fn(char) -> bool,
) -> Result<(), UriError> {
    let bytes = text.as_bytes();
    let mut iter = text[range.clone()].char_indices();
    while let Some((offset, c)) = iter.next() {
        let position = range.start + offset;
        if c == '%' {
            let valid = position + 2 < range.end
                && bytes[position + 1].is_ascii_hexdigit()
                && bytes[position + 2].is_ascii_hexdigit();
            if !valid {
                return Err(UriError::InvalidPercentEncoding { position });
            }
            iter.next();
            iter.next();
        } else if !allowed(c) {
            return Err(UriError::InvalidCharacter {
                component,
                ch: c,
                position,
            });
        }
    }
    Ok(())
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn is_sub_delim(c: char) -> bool {
    matches!(c, '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=')
}

fn is_pchar(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, ':' | '@')
}

fn is_path_char(c: char) -> bool {
    is_pchar(c) || c == '/'
}

fn is_query_char(c: char) -> bool {
    is_pchar(c) || matches!(c, '/' | '?')
}
