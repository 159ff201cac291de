//! Deep links to individual changelog cards.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped by ECMAScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The page the changelog is served from, without query or fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub origin: String,
    pub path: String,
}

impl PageLocation {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
        }
    }

    /// Splits an absolute URL such as `https://site.example/whatsnew.html?x#y`.
    pub fn parse(url: &str) -> anyhow::Result<Self> {
        let url = url.split(['?', '#']).next().unwrap_or_default();
        let (scheme, rest) = url
            .split_once("://")
            .filter(|(scheme, host)| !scheme.is_empty() && !host.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Not an absolute URL: {}", url))?;

        let (host, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, "/"),
        };
        if host.is_empty() {
            anyhow::bail!("Not an absolute URL: {}", url);
        }

        Ok(Self::new(format!("{}://{}", scheme, host), path))
    }
}

/// Percent-encodes a tag for use as a URL fragment.
pub fn encode_fragment(tag: &str) -> String {
    utf8_percent_encode(tag, COMPONENT).to_string()
}

/// Decodes a URL fragment (with or without the leading `#`).
pub fn decode_fragment(fragment: &str) -> String {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    percent_decode_str(fragment).decode_utf8_lossy().into_owned()
}

/// `origin + path + "#" + encoded tag`.
pub fn permalink(location: &PageLocation, tag: &str) -> String {
    format!(
        "{}{}#{}",
        location.origin,
        location.path,
        encode_fragment(tag)
    )
}
