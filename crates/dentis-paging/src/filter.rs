//! Filter state for paginated list views.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Status filter for list views.
///
/// A closed set shared by the dashboards that filter on work-item status.
/// [`StatusFilter::All`] is the wildcard and is omitted from outgoing
/// requests entirely.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Items awaiting processing.
    Pending,
    /// Items currently being worked on.
    InProgress,
    /// Finished items.
    Completed,
    /// Cancelled items.
    Cancelled,
}

impl StatusFilter {
    /// Returns whether this filter matches every status.
    #[inline]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, StatusFilter::All)
    }
}

/// Active filter criteria for one list view.
///
/// Changing either field invalidates every previously fetched page; the
/// list controller reacts by resetting its cursor history before issuing
/// the next fetch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    status: StatusFilter,
    search: String,
}

impl FilterState {
    /// Creates a new filter state with the wildcard status and no search.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status filter.
    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    /// Sets the free-text search query.
    ///
    /// The value is stored as given; blank input is treated as "no search
    /// filter" when building requests, not sent as an empty parameter.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Returns the active status filter.
    #[inline]
    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// Returns the status value to send, or `None` for the wildcard.
    pub fn status_param(&self) -> Option<StatusFilter> {
        (!self.status.is_wildcard()).then_some(self.status)
    }

    /// Returns the trimmed search query to send, or `None` when blank.
    pub fn search_param(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn wildcard_status_is_omitted() {
        let filters = FilterState::new();
        assert_eq!(filters.status_param(), None);

        let mut filters = FilterState::new();
        filters.set_status(StatusFilter::Pending);
        assert_eq!(filters.status_param(), Some(StatusFilter::Pending));
    }

    #[test]
    fn blank_search_is_omitted() {
        let mut filters = FilterState::new();
        assert_eq!(filters.search_param(), None);

        filters.set_search("   ");
        assert_eq!(filters.search_param(), None);

        filters.set_search("  john  ");
        assert_eq!(filters.search_param(), Some("john"));
    }

    #[test]
    fn status_filter_string_forms() {
        assert_eq!(StatusFilter::InProgress.to_string(), "in-progress");
        assert_eq!(
            StatusFilter::from_str("in-progress").expect("parse"),
            StatusFilter::InProgress
        );
        assert!(StatusFilter::from_str("unknown").is_err());
    }
}
