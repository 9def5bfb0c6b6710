//! Completion-service error types.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the completion endpoint.
///
/// Every variant is fatal for the operation that triggered it: the core
/// performs no retries, so callers see exactly one of these per failed
/// request.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion endpoint rejected credentials: {0}")]
    Auth(String),

    #[error("completion quota exhausted: {0}")]
    Quota(String),

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("completion API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompletionError {
    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, CompletionError::RateLimited { .. })
    }

    /// Get the advertised retry delay if this is a rate limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            CompletionError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
