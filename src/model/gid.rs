//! Parsing of Shopify global identifiers (`gid://shopify/Product/123`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string is not a well-formed global identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid global identifier: '{gid}'. Expected 'gid://<domain>/<Kind>/<numeric id>'")]
pub struct GidParseError {
    /// The rejected identifier.
    pub gid: String,
}

/// A parsed global identifier of the form `gid://<domain>/<Kind>/<id>`.
///
/// The resource kind embedded in the identifier is what the bulk parser uses
/// to decide which type a child line decodes into. A trailing query string
/// (`gid://shopify/MediaImage/1?v=2`) is accepted and discarded.
///
/// # Example
///
/// ```rust
/// use shopify_bulk::model::Gid;
///
/// let gid: Gid = "gid://shopify/ProductVariant/42".parse().unwrap();
/// assert_eq!(gid.kind(), "ProductVariant");
/// assert_eq!(gid.id(), 42);
/// assert_eq!(gid.to_string(), "gid://shopify/ProductVariant/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gid {
    domain: String,
    kind: String,
    id: u64,
}

impl Gid {
    const SCHEME: &'static str = "gid://";

    /// Parses a global identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GidParseError`] when the scheme is missing, the kind is not
    /// a word token, or the id is not a decimal integer.
    pub fn parse(gid: &str) -> Result<Self, GidParseError> {
        let invalid = || GidParseError {
            gid: gid.to_string(),
        };

        let rest = gid.strip_prefix(Self::SCHEME).ok_or_else(invalid)?;
        let rest = rest.split_once('?').map_or(rest, |(path, _)| path);

        let mut parts = rest.split('/');
        let (Some(domain), Some(kind), Some(id), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if domain.is_empty() || !is_word(kind) || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let id = id.parse::<u64>().map_err(|_| invalid())?;

        Ok(Self {
            domain: domain.to_string(),
            kind: kind.to_string(),
            id,
        })
    }

    /// Returns the identifier's domain (normally `shopify`).
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the resource kind, such as `Product`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl FromStr for Gid {
    type Err = GidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}/{}", Self::SCHEME, self.domain, self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_domain_kind_and_id() {
        let gid = Gid::parse("gid://shopify/Product/108828309").unwrap();
        assert_eq!(gid.domain(), "shopify");
        assert_eq!(gid.kind(), "Product");
        assert_eq!(gid.id(), 108_828_309);
    }

    #[test]
    fn test_parse_accepts_other_domains() {
        let gid = Gid::parse("gid://x/ProductVariant/9").unwrap();
        assert_eq!(gid.domain(), "x");
        assert_eq!(gid.kind(), "ProductVariant");
    }

    #[test]
    fn test_parse_ignores_query_string() {
        let gid = Gid::parse("gid://shopify/MediaImage/7?v=1700000000").unwrap();
        assert_eq!(gid.kind(), "MediaImage");
        assert_eq!(gid.id(), 7);
        assert_eq!(gid.to_string(), "gid://shopify/MediaImage/7");
    }

    #[test]
    fn test_parse_rejects_malformed_identifiers() {
        for bad in [
            "",
            "123",
            "shopify/Product/1",
            "gid://shopify/Product",
            "gid://shopify/Product/abc",
            "gid://shopify/Product/",
            "gid://shopify//1",
            "gid:///Product/1",
            "gid://shopify/Product/1/extra",
            "gid://shopify/Pro-duct/1",
        ] {
            let err = Gid::parse(bad).unwrap_err();
            assert_eq!(err.gid, bad, "{bad} should be rejected");
        }
    }

    #[test]
    fn test_from_str_matches_parse() {
        let gid: Gid = "gid://shopify/Order/5".parse().unwrap();
        assert_eq!(gid, Gid::parse("gid://shopify/Order/5").unwrap());
    }
}
