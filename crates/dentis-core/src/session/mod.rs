//! Session lifecycle, role model, and access-token claims.
//!
//! Authentication state is held in an explicit [`SessionContext`] that is
//! passed to the components that need it, with `login`/`logout` lifecycle
//! operations. The [`Role`] a session carries is decoded exactly once, at
//! authentication time, from the backend's numeric role code.

mod claims;
mod context;
mod role;

pub use claims::AccessClaims;
pub use context::{Session, SessionContext};
pub use role::{Role, RoleCode, RoleIdentifiers};
