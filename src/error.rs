//! Error types for tola-outline.
//!
//! The engine never surfaces these to the reader. They exist so the fallible
//! builders can say *why* the subsystem disabled itself; the silent entry
//! point (`OutlineSync::attach`) logs the reason and returns `None`.

use thiserror::Error;

/// Errors that can occur while building or driving the outline engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// The outline panel element was not found on the page
    #[error("outline panel `#{0}` not found")]
    MissingPanel(String),

    /// The content region element was not found on the page
    #[error("content region `#{0}` not found")]
    MissingContent(String),

    /// The content region holds no heading the outline can point at
    #[error("content region contains no indexable headings (levels h1..h{max_level})")]
    NoHeadings {
        /// Deepest heading tag level that was searched for
        max_level: u8,
    },

    /// A link target was not a usable `#fragment`
    #[error("invalid fragment: {0:?}")]
    InvalidFragment(String),

    /// A style value could not be read as a pixel length
    #[error("invalid pixel length: {0:?}")]
    InvalidLength(String),
}

/// Result type alias for outline operations.
pub type OutlineResult<T> = Result<T, OutlineError>;

impl OutlineError {
    /// Create an invalid fragment error.
    pub fn invalid_fragment(raw: impl Into<String>) -> Self {
        Self::InvalidFragment(raw.into())
    }

    /// Create an invalid length error.
    pub fn invalid_length(raw: impl Into<String>) -> Self {
        Self::InvalidLength(raw.into())
    }

    /// Whether this error means a page prerequisite is absent.
    ///
    /// These disable the whole subsystem rather than a single lookup.
    pub fn is_missing_prerequisite(&self) -> bool {
        matches!(
            self,
            Self::MissingPanel(_) | Self::MissingContent(_) | Self::NoHeadings { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutlineError::MissingPanel("toc".to_string());
        assert_eq!(err.to_string(), "outline panel `#toc` not found");

        let err = OutlineError::NoHeadings { max_level: 3 };
        assert_eq!(
            err.to_string(),
            "content region contains no indexable headings (levels h1..h3)"
        );

        let err = OutlineError::invalid_fragment("page.html");
        assert_eq!(err.to_string(), "invalid fragment: \"page.html\"");
    }

    #[test]
    fn test_missing_prerequisite() {
        assert!(OutlineError::MissingContent("content".into()).is_missing_prerequisite());
        assert!(!OutlineError::invalid_length("abc").is_missing_prerequisite());
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(OutlineError: Send, Sync, std::error::Error);
    }
}
