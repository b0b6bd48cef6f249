//! Page query and result types for cursor-paginated endpoints.

use serde::{Deserialize, Serialize};

use crate::filter::FilterState;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for one page fetch.
///
/// Serializes directly into the query string of a list endpoint: `limit` is
/// always present; `cursor` is omitted on the first page; `status` is
/// omitted for the wildcard filter; `search` is omitted when blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Cursor pointing past the last item of the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Status filter value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Trimmed free-text search query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageQuery {
    /// Creates a query for the first page with the given limit.
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            cursor: None,
            status: None,
            search: None,
        }
    }

    /// Builds a query from filter state and an optional cursor.
    pub fn from_filters(limit: u32, filters: &FilterState, cursor: Option<&str>) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            cursor: cursor.map(str::to_owned),
            status: filters.status_param().map(|status| status.to_string()),
            search: filters.search_param().map(str::to_owned),
        }
    }

    /// Returns whether this query targets the first page.
    #[inline]
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }
}

/// One page of a cursor-paginated result set.
///
/// Decoded from the wire shape
/// `{ count, items, hasNextPage, nextCursor? }`. A page is replaced
/// wholesale on every successful fetch; stale data is never merged with new
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Total count of items matching the query (across all pages).
    pub count: u64,
    /// The items in this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Whether more items exist past this page.
    pub has_next_page: bool,
    /// Cursor to fetch the next page. Present only when more items exist.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Creates an empty page.
    pub fn empty() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
            has_next_page: false,
            next_cursor: None,
        }
    }

    /// Returns the number of items on this page.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether this page holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
            has_next_page: self.has_next_page,
            next_cursor: self.next_cursor,
        }
    }
}
