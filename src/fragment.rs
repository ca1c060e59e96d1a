//! URL fragment identifiers.
//!
//! Outline links, heading self-links and the page location all name sections
//! through `#fragment` strings. `Fragment` is the validated form used as a key
//! in every lookup table.

use std::fmt;

use compact_str::CompactString;

use crate::error::{OutlineError, OutlineResult};

/// A non-empty URL fragment, stored without its leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment(CompactString);

impl Fragment {
    /// Create a fragment from a bare section name (no `#`).
    ///
    /// Returns `None` for an empty name.
    pub fn new(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref();
        if name.is_empty() {
            None
        } else {
            Some(Self(CompactString::new(name)))
        }
    }

    /// Parse an `href` or location hash of the form `#name`.
    ///
    /// Only same-document fragment links qualify: `page.html#a`, `/x` and a
    /// bare `#` are rejected.
    pub fn parse(href: &str) -> OutlineResult<Self> {
        href.trim()
            .strip_prefix('#')
            .and_then(Self::new)
            .ok_or_else(|| OutlineError::invalid_fragment(href))
    }

    /// Lenient form of [`Fragment::parse`] for lookups that treat
    /// malformed input as "no target".
    pub fn from_href(href: &str) -> Option<Self> {
        Self::parse(href).ok()
    }

    /// The section name without `#`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The fragment as it appears in an `href` (`#name`).
    pub fn to_href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
