//! Explicit session state shared across service clients.
//!
//! The upstream application kept auth state in ambient globals; here it is
//! an explicit [`SessionContext`] handle with `login`/`logout` lifecycle
//! operations, passed to every component that needs it.

use std::sync::{Arc, PoisonError, RwLock};

use jiff::Timestamp;
use uuid::Uuid;

use crate::TRACING_TARGET_SESSION;
use crate::session::{AccessClaims, Role};

/// An authenticated session.
///
/// Produced by a successful login; the [`Role`] is decoded once at that
/// point and carried for the lifetime of the session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token presented on every authenticated request.
    pub access_token: String,
    /// Account the session belongs to.
    pub account_id: Uuid,
    /// Role decoded at authentication time.
    pub role: Role,
    /// When the token was issued.
    pub issued_at: Timestamp,
    /// When the token expires.
    pub expires_at: Timestamp,
}

impl Session {
    /// Creates a session from an access token, its claims, and the decoded role.
    pub fn new(access_token: impl Into<String>, claims: &AccessClaims, role: Role) -> Self {
        Self {
            access_token: access_token.into(),
            account_id: claims.account_id,
            role,
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        }
    }

    /// Checks if the session token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The access token is a credential; keep it out of logs.
        f.debug_struct("Session")
            .field("account_id", &self.account_id)
            .field("role", &self.role)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Shared handle to the current session.
///
/// Cheap to clone; all clones observe the same session state. One context is
/// created per embedding application and handed to every service client.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Creates a new context with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a session, replacing any previous one.
    pub fn login(&self, session: Session) {
        tracing::info!(
            target: TRACING_TARGET_SESSION,
            account_id = %session.account_id,
            role = %session.role.code(),
            expires_at = %session.expires_at,
            "Session established"
        );

        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(session);
    }

    /// Clears the active session.
    ///
    /// Returns whether a session was present.
    pub fn logout(&self) -> bool {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let had_session = guard.take().is_some();

        if had_session {
            tracing::info!(target: TRACING_TARGET_SESSION, "Session cleared");
        }

        had_session
    }

    /// Returns a snapshot of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the bearer token of the current session, if any.
    pub fn bearer_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// Returns whether an unexpired session is active.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|session| !session.is_expired())
    }
}
