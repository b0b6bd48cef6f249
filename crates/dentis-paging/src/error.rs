//! Error types for page loading.

/// Type-erased error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error surfaced when a page fetch fails.
///
/// A failed fetch never mutates cursor history or the pagination position;
/// the controller keeps the last known-good page and the view decides how to
/// surface the retry affordance.
#[derive(Debug, thiserror::Error)]
#[must_use = "load failures should be surfaced to the view"]
pub enum PagingError {
    /// Transport or server failure while loading a page.
    #[error("Page load failed: {0}")]
    LoadFailed(#[source] BoxError),
}

impl PagingError {
    /// Wraps any error source into a load failure.
    pub fn load_failed(source: impl Into<BoxError>) -> Self {
        PagingError::LoadFailed(source.into())
    }
}

/// Specialized [`Result`] type for paging operations.
pub type PagingResult<T, E = PagingError> = Result<T, E>;
