//! Error types and utilities shared across the Dentis SDK.
//!
//! This module provides the foundation error taxonomy for session and token
//! handling. Service clients wrap these errors into their own taxonomies.

use std::borrow::Cow;

/// Type-erased error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for session and access-token operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "core errors should be handled appropriately"]
pub enum CoreError {
    /// Access token could not be decoded.
    ///
    /// This includes structurally invalid JWTs and payloads that do not
    /// deserialize into the expected claim set.
    #[error("Access token decode error: {0}")]
    TokenDecode(#[from] jsonwebtoken::errors::Error),

    /// The backend returned a role code outside the closed role set.
    ///
    /// Role codes are decoded exactly once at authentication time; an
    /// unknown code means the login response cannot be trusted.
    #[error("Unknown role code: {0}")]
    UnknownRole(u16),

    /// A required identifier was absent from the authentication response.
    ///
    /// Each role variant carries the identifiers it needs. A response that
    /// omits one of them is rejected rather than patched from heuristics.
    #[error("Missing identifier in authentication response: {0}")]
    MissingIdentifier(&'static str),

    /// The authentication response disagrees with its own token claims.
    #[error("Authentication response is inconsistent: {0}")]
    Inconsistent(Cow<'static, str>),
}

impl CoreError {
    /// Returns whether this error indicates a malformed backend response.
    ///
    /// All core errors stem from contract violations on the authentication
    /// surface; retrying the same request will not succeed.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, CoreError::TokenDecode(_))
    }
}

/// Specialized [`Result`] type for core operations.
pub type CoreResult<T, E = CoreError> = Result<T, E>;
