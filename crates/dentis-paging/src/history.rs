//! Navigable history of observed page cursors.

use crate::TRACING_TARGET_HISTORY;

/// Ordered history of page-boundary cursors with the current position.
///
/// Index 0 always denotes "no cursor" (the first page); index `i` holds the
/// cursor that produces page `i`. Pages are discovered lazily, so the
/// history length is a lower bound on the total number of pages. Within a
/// stable filter state the history is append-only; a filter change resets
/// it via [`CursorHistory::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorHistory {
    /// Cursor per known page; `entries[0]` is always the `None` sentinel.
    entries: Vec<Option<String>>,
    /// Index of the page currently displayed.
    position: usize,
}

impl Default for CursorHistory {
    fn default() -> Self {
        Self {
            entries: vec![None],
            position: 0,
        }
    }
}

impl CursorHistory {
    /// Creates a history containing only the first-page sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the history to the first-page sentinel and position 0.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(None);
        self.position = 0;

        tracing::debug!(target: TRACING_TARGET_HISTORY, "Cursor history reset");
    }

    /// Records the next-page cursor reported by the page at the current
    /// position.
    ///
    /// A next cursor observed at page `p` belongs at index `p + 1`, so only
    /// the frontier page (the last one discovered) can grow the history;
    /// re-fetching an earlier page re-observes a cursor that is already
    /// stored. Appends only when the page reports a next page, the token is
    /// present, and the token differs from the last stored entry. Safe to
    /// call redundantly: retried or re-triggered fetches of the same page
    /// leave the history unchanged.
    pub fn record_next_cursor(&mut self, token: Option<&str>, has_next: bool) {
        if !has_next {
            return;
        }
        let Some(token) = token else {
            return;
        };

        if self.position + 1 != self.entries.len() {
            return;
        }

        let is_duplicate = self
            .entries
            .last()
            .is_some_and(|last| last.as_deref() == Some(token));
        if is_duplicate {
            return;
        }

        self.entries.push(Some(token.to_owned()));

        tracing::debug!(
            target: TRACING_TARGET_HISTORY,
            pages_known = self.entries.len(),
            "Next-page cursor recorded"
        );
    }

    /// Moves the position to `index`, clamped to the known page range.
    ///
    /// Returns the resulting position. Seeking never fetches; reacting to a
    /// position change is the list controller's responsibility.
    pub fn seek(&mut self, index: usize) -> usize {
        self.position = index.min(self.entries.len() - 1);
        self.position
    }

    /// Moves forward one page if the next cursor is already discovered.
    ///
    /// Returns whether the position changed. Pages are discovered lazily,
    /// so advancing past the known range requires fetching the current page
    /// first, which is what grows the history.
    pub fn advance(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Moves back one page. Returns whether the position changed.
    pub fn retreat(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Returns the current position (zero-based page index).
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of known pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether only the first page is known.
    ///
    /// The sentinel entry always exists, so the history is never truly
    /// empty; this mirrors the conventional `len`/`is_empty` pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Returns the cursor for the page at the current position.
    ///
    /// `None` means the first-page sentinel.
    pub fn current_cursor(&self) -> Option<&str> {
        self.entries[self.position].as_deref()
    }

    /// Returns the cursor for page `index`, if that page is discovered.
    pub fn cursor_at(&self, index: usize) -> Option<Option<&str>> {
        self.entries.get(index).map(Option::as_deref)
    }
}
