#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for session lifecycle operations.
///
/// Use this target for logging login, logout, and session replacement events.
pub const TRACING_TARGET_SESSION: &str = "dentis_core::session";

/// Tracing target for access-token claim operations.
///
/// Use this target for logging token decoding and claim validation events.
pub const TRACING_TARGET_CLAIMS: &str = "dentis_core::claims";

mod error;
pub mod session;

pub use crate::error::{BoxError, CoreError, CoreResult};
pub use crate::session::{
    AccessClaims, Role, RoleCode, RoleIdentifiers, Session, SessionContext,
};
