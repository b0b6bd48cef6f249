//! The seam between the list controller and a backend list endpoint.

use crate::error::PagingResult;
use crate::page::{Page, PageQuery};

/// Fetches one page of records from a cursor-paginated endpoint.
///
/// Implementations translate a [`PageQuery`] into a request against one
/// concrete list endpoint and decode the typed page. Any transport or
/// server failure must surface as an error rather than a panic; the
/// controller converts it into its error phase without touching navigation
/// state.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// The domain record type this endpoint returns.
    type Item: Send;

    /// Fetches the page selected by `query`.
    ///
    /// # Errors
    ///
    /// Returns a load failure for any transport, decode, or server error.
    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<Self::Item>>;
}
