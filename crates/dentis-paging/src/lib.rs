#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for list controller operations.
///
/// Use this target for logging fetch orchestration, navigation, and
/// stale-result discards.
pub const TRACING_TARGET_CONTROLLER: &str = "dentis_paging::controller";

/// Tracing target for cursor history operations.
///
/// Use this target for logging history growth and resets.
pub const TRACING_TARGET_HISTORY: &str = "dentis_paging::history";

mod controller;
mod error;
mod fetch;
mod filter;
mod history;
mod page;

pub use crate::controller::{DisplayRange, ListController, LoadPhase, LoadTicket};
pub use crate::error::{BoxError, PagingError, PagingResult};
pub use crate::fetch::PageFetcher;
pub use crate::filter::{FilterState, StatusFilter};
pub use crate::history::CursorHistory;
pub use crate::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageQuery};
