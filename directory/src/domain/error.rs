//! Failures surfaced by directory loads and starred refreshes.
//!
//! Errors propagate to whatever triggered the operation (mount, pull to
//! refresh, change notification). Nothing here retries. An oversized
//! directory is a defined outcome, not an error, and has no variant.

use super::ports::ContactSourceError;

/// Domain error for directory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// A fetch issued by a full load failed.
    #[error("directory source unavailable: {0}")]
    SourceUnavailable(#[source] ContactSourceError),
    /// The starred re-fetch failed; the previous snapshot was kept.
    #[error("starred refresh failed: {0}")]
    StarredRefreshFailed(#[source] ContactSourceError),
}

impl DirectoryError {
    /// Underlying adapter error.
    pub fn source_error(&self) -> &ContactSourceError {
        match self {
            Self::SourceUnavailable(source) | Self::StarredRefreshFailed(source) => source,
        }
    }

    /// Whether a starred refresh failed, as opposed to a full load.
    pub fn is_starred_refresh(&self) -> bool {
        matches!(self, Self::StarredRefreshFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error as _;

    #[rstest]
    fn source_unavailable_formats_with_cause() {
        let err = DirectoryError::SourceUnavailable(ContactSourceError::unavailable("offline"));
        assert_eq!(
            err.to_string(),
            "directory source unavailable: contact source unavailable: offline"
        );
        assert!(err.source().is_some());
        assert!(!err.is_starred_refresh());
    }

    #[rstest]
    fn starred_refresh_failed_exposes_adapter_error() {
        let cause = ContactSourceError::malformed("bad json");
        let err = DirectoryError::StarredRefreshFailed(cause.clone());
        assert!(err.is_starred_refresh());
        assert_eq!(err.source_error(), &cause);
    }
}
