//! Error types and utilities for backend requests.
//!
//! Every transport, decoding, and contract failure a service client can hit
//! is folded into [`ApiError`]; errors never propagate as panics across the
//! SDK boundary.

use dentis_core::CoreError;
use dentis_paging::PagingError;

/// Comprehensive error type for all backend request operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "request errors should be handled appropriately"]
pub enum ApiError {
    /// Configuration error.
    ///
    /// This includes unparsable base URLs, unsupported URL schemes, and
    /// invalid client parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Transport-level failure (connection refused, TLS, DNS).
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("Backend returned HTTP {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Error message extracted from the response body, if any.
        message: String,
    },

    /// Response body could not be decoded into the expected type.
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An authenticated call was made without an active session.
    #[error("No active session")]
    Session,

    /// Outbound payload failed validation before it was sent.
    #[error("Request validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The backend violated its own contract.
    ///
    /// Covers authentication responses that disagree with their token
    /// claims, unknown role codes, and undecodable issued tokens.
    #[error("Malformed backend response: {0}")]
    Malformed(#[from] CoreError),
}

impl ApiError {
    /// Returns whether this error indicates a transient failure that might
    /// succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Timeout => true,
            ApiError::Transport(error) => error.is_connect(),
            ApiError::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// Returns whether the backend rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { code: 401, .. } | ApiError::Session)
    }

    /// Returns whether the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { code: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(error)
        }
    }
}

impl From<ApiError> for PagingError {
    fn from(error: ApiError) -> Self {
        PagingError::load_failed(error)
    }
}

/// Specialized [`Result`] type for backend request operations.
pub type ApiResult<T, E = ApiError> = Result<T, E>;
