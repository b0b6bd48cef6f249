//! Fetch orchestration for one cursor-paginated list view.

use crate::TRACING_TARGET_CONTROLLER;
use crate::error::{PagingError, PagingResult};
use crate::fetch::PageFetcher;
use crate::filter::{FilterState, StatusFilter};
use crate::history::CursorHistory;
use crate::page::{DEFAULT_PAGE_SIZE, Page, PageQuery};

/// Load phase of a list controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// A fetch is in flight. Navigation affordances are disabled.
    Loading,
    /// The most recent fetch succeeded and its page is current.
    Loaded,
    /// The most recent fetch failed; the previous good page, if any, is
    /// retained and navigation state is unchanged.
    Error,
}

/// Ticket identifying one triggered fetch.
///
/// Every state change that requires a fetch produces a ticket carrying the
/// query to execute and a sequence number. Applying a result with a ticket
/// that is no longer current is a no-op, which is what guarantees
/// "last request wins" ordering under rapid filter or navigation changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket's fetch must be run and applied, or the view stays loading"]
pub struct LoadTicket {
    sequence: u64,
    query: PageQuery,
}

impl LoadTicket {
    /// Returns the query this ticket's fetch should execute.
    #[inline]
    pub fn query(&self) -> &PageQuery {
        &self.query
    }
}

/// Inclusive "showing X-Y of N" range for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    /// 1-based index of the first displayed item, 0 for an empty page.
    pub start: u64,
    /// 1-based index of the last displayed item, 0 for an empty page.
    pub end: u64,
    /// Total count of items matching the active filters.
    pub total: u64,
}

/// Orchestrates fetching, filtering, and navigation for one list view.
///
/// The controller owns its [`FilterState`], [`CursorHistory`], pagination
/// position, and current page exclusively; each dashboard view instantiates
/// an independent controller and nothing is shared between instances.
///
/// Two integration styles are supported:
///
/// - The async operations ([`refresh`], [`set_status`], [`go_next`], ...)
///   mutate state, run the fetch on the owned fetcher, and apply the result.
/// - Event-driven embedders use the split seam instead: a mutation returns a
///   [`LoadTicket`], the embedder runs the fetch however it likes, and hands
///   the outcome to [`apply`]. Results for superseded tickets are discarded.
///
/// Dropping the controller drops all outstanding tickets with it, so a late
/// response for an unmounted view has nothing to corrupt.
///
/// [`refresh`]: ListController::refresh
/// [`set_status`]: ListController::set_status
/// [`go_next`]: ListController::go_next
/// [`apply`]: ListController::apply
pub struct ListController<F: PageFetcher> {
    fetcher: F,
    filters: FilterState,
    history: CursorHistory,
    page_size: u32,
    sequence: u64,
    phase: LoadPhase,
    current: Option<Page<F::Item>>,
    last_error: Option<PagingError>,
}

impl<F: PageFetcher> std::fmt::Debug for ListController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("filters", &self.filters)
            .field("history", &self.history)
            .field("page_size", &self.page_size)
            .field("sequence", &self.sequence)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<F: PageFetcher> ListController<F> {
    /// Creates a controller with the default page size.
    ///
    /// The controller starts in [`LoadPhase::Loading`]: the view is expected
    /// to trigger the first fetch on mount via [`ListController::refresh`].
    pub fn new(fetcher: F) -> Self {
        Self::with_page_size(fetcher, DEFAULT_PAGE_SIZE)
    }

    /// Creates a controller with a fixed per-view page size.
    pub fn with_page_size(fetcher: F, page_size: u32) -> Self {
        Self {
            fetcher,
            filters: FilterState::new(),
            history: CursorHistory::new(),
            page_size: page_size.max(1),
            sequence: 0,
            phase: LoadPhase::Loading,
            current: None,
            last_error: None,
        }
    }

    /// Returns the fetcher this controller drives.
    #[inline]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // State exposed to the view.

    /// Returns the current load phase.
    #[inline]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Returns whether a fetch is in flight.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Returns the last known-good page, if any.
    #[inline]
    pub fn current_page(&self) -> Option<&Page<F::Item>> {
        self.current.as_ref()
    }

    /// Returns the error of the most recent failed fetch, if the controller
    /// is in the error phase.
    pub fn last_error(&self) -> Option<&PagingError> {
        (self.phase == LoadPhase::Error)
            .then_some(self.last_error.as_ref())
            .flatten()
    }

    /// Returns the active filter state.
    #[inline]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Returns the number of pages discovered so far.
    ///
    /// Pages are discovered lazily, so this is a lower bound on the total.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the 1-based number of the displayed page.
    #[inline]
    pub fn current_page_number(&self) -> usize {
        self.history.position() + 1
    }

    /// Returns whether the "next page" affordance should be enabled.
    pub fn can_go_next(&self) -> bool {
        !self.is_loading()
            && self
                .current
                .as_ref()
                .is_some_and(|page| page.has_next_page)
    }

    /// Returns whether the "previous page" affordance should be enabled.
    pub fn can_go_prev(&self) -> bool {
        !self.is_loading() && self.history.position() > 0
    }

    /// Returns the "showing X-Y of N" range for the current page.
    ///
    /// `None` until the first successful fetch.
    pub fn display_range(&self) -> Option<DisplayRange> {
        let page = self.current.as_ref()?;
        if page.is_empty() {
            return Some(DisplayRange {
                start: 0,
                end: 0,
                total: page.count,
            });
        }

        let position = self.history.position() as u64;
        let start = position * u64::from(self.page_size) + 1;
        Some(DisplayRange {
            start,
            end: start + page.len() as u64 - 1,
            total: page.count,
        })
    }

    // State changes. Each returns the ticket for the fetch it requires;
    // navigation that cannot proceed returns `None` and changes nothing.

    /// Re-fetches the page at the current position with the current filters.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.sequence += 1;
        self.phase = LoadPhase::Loading;

        let query = PageQuery::from_filters(
            self.page_size,
            &self.filters,
            self.history.current_cursor(),
        );

        tracing::debug!(
            target: TRACING_TARGET_CONTROLLER,
            sequence = self.sequence,
            page = self.current_page_number(),
            first_page = query.is_first_page(),
            "Page fetch triggered"
        );

        LoadTicket {
            sequence: self.sequence,
            query,
        }
    }

    /// Changes the status filter.
    ///
    /// Every call invalidates all previously fetched pages: the cursor
    /// history collapses to the first-page sentinel and position 0 before
    /// the returned fetch is issued.
    pub fn set_status(&mut self, status: StatusFilter) -> LoadTicket {
        self.filters.set_status(status);
        self.history.reset();
        self.begin_load()
    }

    /// Changes the free-text search query. Same reset semantics as
    /// [`ListController::set_status`].
    pub fn set_search(&mut self, search: impl Into<String>) -> LoadTicket {
        self.filters.set_search(search);
        self.history.reset();
        self.begin_load()
    }

    /// Moves to the next page.
    ///
    /// A no-op when the current page reports no next page or a fetch is in
    /// flight; the next cursor is always recorded before the affordance
    /// enables, so advancing never outruns the discovered history.
    pub fn go_next(&mut self) -> Option<LoadTicket> {
        if !self.can_go_next() || !self.history.advance() {
            return None;
        }
        Some(self.begin_load())
    }

    /// Moves to the previous page. A no-op on the first page.
    pub fn go_prev(&mut self) -> Option<LoadTicket> {
        if !self.can_go_prev() || !self.history.retreat() {
            return None;
        }
        Some(self.begin_load())
    }

    /// Jumps to a 1-based page number.
    ///
    /// Only pages already discovered can be targeted; anything out of range
    /// is a no-op, never an error.
    pub fn go_to_page(&mut self, number: usize) -> Option<LoadTicket> {
        if self.is_loading() {
            return None;
        }

        let index = number.checked_sub(1)?;
        if index >= self.history.len() || index == self.history.position() {
            return None;
        }

        self.history.seek(index);
        Some(self.begin_load())
    }

    /// Applies a fetch outcome.
    ///
    /// Returns whether the result was applied. A result whose ticket has
    /// been superseded by a newer fetch is discarded so that a stale
    /// response can never overwrite fresher state. A failure moves the
    /// controller to the error phase but leaves the cursor history, the
    /// position, and the previous good page untouched.
    pub fn apply(&mut self, ticket: &LoadTicket, result: PagingResult<Page<F::Item>>) -> bool {
        if ticket.sequence != self.sequence {
            tracing::debug!(
                target: TRACING_TARGET_CONTROLLER,
                stale_sequence = ticket.sequence,
                current_sequence = self.sequence,
                "Discarding stale fetch result"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.history
                    .record_next_cursor(page.next_cursor.as_deref(), page.has_next_page);
                self.current = Some(page);
                self.last_error = None;
                self.phase = LoadPhase::Loaded;

                tracing::debug!(
                    target: TRACING_TARGET_CONTROLLER,
                    sequence = ticket.sequence,
                    page = self.current_page_number(),
                    pages_known = self.page_count(),
                    "Page fetch applied"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONTROLLER,
                    sequence = ticket.sequence,
                    error = %error,
                    "Page fetch failed"
                );

                self.last_error = Some(error);
                self.phase = LoadPhase::Error;
            }
        }

        true
    }

    /// Runs a ticket's fetch on the owned fetcher and applies the outcome.
    ///
    /// Returns whether the result was applied (`false` when superseded).
    pub async fn run(&mut self, ticket: LoadTicket) -> bool {
        let result = self.fetcher.fetch_page(&ticket.query).await;
        self.apply(&ticket, result)
    }

    /// Fetches the current (filters, position) pair and applies the result.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_load();
        self.run(ticket).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Record {
        id: u32,
    }

    fn records(range: std::ops::RangeInclusive<u32>) -> Vec<Record> {
        range.map(|id| Record { id }).collect()
    }

    fn page(
        count: u64,
        items: Vec<Record>,
        next_cursor: Option<&str>,
    ) -> Page<Record> {
        Page {
            count,
            items,
            has_next_page: next_cursor.is_some(),
            next_cursor: next_cursor.map(str::to_owned),
        }
    }

    /// Serves canned pages keyed by (cursor, status, search); unknown keys
    /// fail the fetch. Records every query it answers.
    #[derive(Default)]
    struct ScriptedFetcher {
        pages: HashMap<(Option<String>, Option<String>, Option<String>), Page<Record>>,
        seen: Mutex<Vec<PageQuery>>,
    }

    impl ScriptedFetcher {
        fn with_page(
            mut self,
            cursor: Option<&str>,
            status: Option<&str>,
            search: Option<&str>,
            page: Page<Record>,
        ) -> Self {
            self.pages.insert(
                (
                    cursor.map(str::to_owned),
                    status.map(str::to_owned),
                    search.map(str::to_owned),
                ),
                page,
            );
            self
        }

        fn last_query(&self) -> PageQuery {
            self.seen
                .lock()
                .expect("lock")
                .last()
                .cloned()
                .expect("at least one query")
        }
    }

    #[async_trait::async_trait]
    impl PageFetcher for ScriptedFetcher {
        type Item = Record;

        async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<Record>> {
            self.seen.lock().expect("lock").push(query.clone());

            let key = (
                query.cursor.clone(),
                query.status.clone(),
                query.search.clone(),
            );
            self.pages
                .get(&key)
                .cloned()
                .ok_or_else(|| PagingError::load_failed("no scripted page for query"))
        }
    }

    fn first_load_fetcher() -> ScriptedFetcher {
        ScriptedFetcher::default()
            .with_page(None, None, None, page(23, records(1..=10), Some("abc")))
            .with_page(Some("abc"), None, None, page(23, records(11..=20), Some("def")))
            .with_page(Some("def"), None, None, page(23, records(21..=23), None))
    }

    #[tokio::test]
    async fn first_load_scenario() {
        let mut controller = ListController::new(first_load_fetcher());
        assert!(controller.is_loading());
        assert_eq!(controller.display_range(), None);

        assert!(controller.refresh().await);

        assert_eq!(controller.phase(), LoadPhase::Loaded);
        assert_eq!(controller.page_count(), 2); // ["", "abc"]
        assert_eq!(controller.current_page_number(), 1);
        assert!(controller.can_go_next());
        assert!(!controller.can_go_prev());
        assert_eq!(
            controller.display_range(),
            Some(DisplayRange {
                start: 1,
                end: 10,
                total: 23
            })
        );
    }

    #[tokio::test]
    async fn advance_then_retreat_scenario() {
        let mut controller = ListController::new(first_load_fetcher());
        controller.refresh().await;

        let ticket = controller.go_next().expect("next page discovered");
        assert_eq!(ticket.query().cursor.as_deref(), Some("abc"));
        assert!(controller.run(ticket).await);

        assert_eq!(controller.current_page_number(), 2);
        assert_eq!(controller.page_count(), 3); // ["", "abc", "def"]
        assert_eq!(
            controller.display_range(),
            Some(DisplayRange {
                start: 11,
                end: 20,
                total: 23
            })
        );

        let ticket = controller.go_prev().expect("can retreat");
        assert!(ticket.query().is_first_page());
        assert!(controller.run(ticket).await);

        assert_eq!(controller.current_page_number(), 1);
        assert_eq!(controller.current_page().expect("page").items[0].id, 1);
        // Retreating re-fetches; history is unchanged.
        assert_eq!(controller.page_count(), 3);
    }

    #[tokio::test]
    async fn filter_change_resets_history_before_fetch_resolves() {
        let fetcher = first_load_fetcher().with_page(
            None,
            Some("pending"),
            None,
            page(3, records(1..=3), None),
        );
        let mut controller = ListController::new(fetcher);
        controller.refresh().await;
        let next = controller.go_next().expect("next");
        controller.run(next).await;
        assert_eq!(controller.current_page_number(), 2);

        let ticket = controller.set_status(StatusFilter::Pending);

        // Reset is observable before the fetch resolves.
        assert_eq!(controller.page_count(), 1);
        assert_eq!(controller.current_page_number(), 1);
        assert!(controller.is_loading());
        assert_eq!(ticket.query().status.as_deref(), Some("pending"));
        assert!(ticket.query().is_first_page());

        assert!(controller.run(ticket).await);
        let sent = controller.fetcher().last_query();
        assert_eq!(sent.status.as_deref(), Some("pending"));
        assert_eq!(sent.cursor, None);
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let mut controller = ListController::new(ScriptedFetcher::default());

        let stale = controller.begin_load();
        let fresh = controller.set_search("john");

        // The fresh fetch resolves first.
        assert!(controller.apply(&fresh, Ok(page(1, records(1..=1), None))));
        // The stale fetch resolves afterwards and must be discarded.
        assert!(!controller.apply(&stale, Ok(page(23, records(1..=10), Some("abc")))));

        let current = controller.current_page().expect("page");
        assert_eq!(current.count, 1);
        assert_eq!(current.items, records(1..=1));
        assert_eq!(controller.page_count(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_preserves_navigation_state() {
        let fetcher = first_load_fetcher();
        let mut controller = ListController::new(fetcher);
        controller.refresh().await;
        let next = controller.go_next().expect("next");
        controller.run(next).await;

        let pages_before = controller.page_count();
        let position_before = controller.current_page_number();

        // No scripted page for this query: the fetch fails.
        let ticket = controller.set_search("missing");
        let reset_pages = controller.page_count();
        assert!(controller.run(ticket).await);

        assert_eq!(controller.phase(), LoadPhase::Error);
        assert!(controller.last_error().is_some());
        assert_eq!(controller.page_count(), reset_pages);
        assert!(pages_before > reset_pages);
        assert!(position_before > controller.current_page_number());
        // The previous good page is retained for the view.
        assert!(controller.current_page().is_some());
    }

    #[tokio::test]
    async fn error_phase_recovers_on_refresh() {
        let fetcher = ScriptedFetcher::default().with_page(
            None,
            None,
            None,
            page(2, records(1..=2), None),
        );
        let mut controller = ListController::new(fetcher);

        let ticket = controller.begin_load();
        controller.apply(&ticket, Err(PagingError::load_failed("boom")));
        assert_eq!(controller.phase(), LoadPhase::Error);

        assert!(controller.refresh().await);
        assert_eq!(controller.phase(), LoadPhase::Loaded);
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn go_next_is_noop_without_next_page() {
        let fetcher = ScriptedFetcher::default().with_page(
            None,
            None,
            None,
            page(2, records(1..=2), None),
        );
        let mut controller = ListController::new(fetcher);
        controller.refresh().await;

        assert!(!controller.can_go_next());
        assert!(controller.go_next().is_none());
        assert_eq!(controller.current_page_number(), 1);
    }

    #[tokio::test]
    async fn go_prev_is_noop_on_first_page() {
        let mut controller = ListController::new(first_load_fetcher());
        controller.refresh().await;

        assert!(controller.go_prev().is_none());
        assert_eq!(controller.current_page_number(), 1);
    }

    #[tokio::test]
    async fn go_to_page_beyond_discovered_history_is_noop() {
        let mut controller = ListController::new(first_load_fetcher());
        controller.refresh().await;
        assert_eq!(controller.page_count(), 2);

        assert!(controller.go_to_page(0).is_none());
        assert!(controller.go_to_page(3).is_none());
        assert!(controller.go_to_page(1).is_none()); // already there

        let ticket = controller.go_to_page(2).expect("discovered page");
        assert_eq!(ticket.query().cursor.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn display_range_for_partial_third_page() {
        let fetcher = ScriptedFetcher::default()
            .with_page(None, None, None, page(27, records(1..=10), Some("p2")))
            .with_page(Some("p2"), None, None, page(27, records(11..=20), Some("p3")))
            .with_page(Some("p3"), None, None, page(27, records(21..=27), None));
        let mut controller = ListController::new(fetcher);
        controller.refresh().await;
        let t = controller.go_next().expect("page 2");
        controller.run(t).await;
        let t = controller.go_next().expect("page 3");
        controller.run(t).await;

        assert_eq!(
            controller.display_range(),
            Some(DisplayRange {
                start: 21,
                end: 27,
                total: 27
            })
        );
    }

    #[tokio::test]
    async fn empty_result_displays_zero_range() {
        let fetcher = ScriptedFetcher::default().with_page(
            None,
            None,
            None,
            Page::empty(),
        );
        let mut controller = ListController::new(fetcher);
        controller.refresh().await;

        assert_eq!(
            controller.display_range(),
            Some(DisplayRange {
                start: 0,
                end: 0,
                total: 0
            })
        );
        assert!(!controller.can_go_next());
    }

    #[tokio::test]
    async fn repeated_apply_of_same_page_keeps_history_stable() {
        let mut controller = ListController::new(ScriptedFetcher::default());

        let ticket = controller.begin_load();
        assert!(controller.apply(&ticket, Ok(page(23, records(1..=10), Some("abc")))));
        let pages = controller.page_count();

        // A re-triggered fetch of the same page reports the same cursor.
        let ticket = controller.begin_load();
        assert!(controller.apply(&ticket, Ok(page(23, records(1..=10), Some("abc")))));
        assert_eq!(controller.page_count(), pages);
    }
}
