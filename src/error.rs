//! Application error type and HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by store operations and request handlers.
///
/// Storage I/O and parse failures never reach this type: the store absorbs
/// them at its boundary (logged, degraded to an empty collection or a dropped
/// write). What remains is the one client-caused failure the system has --
/// addressing a task by an index that no longer exists -- plus a catch-all
/// for anything unexpected.
#[derive(Debug, Error)]
pub enum AppError {
    /// A positional index pointed past the end of the collection. Indices go
    /// stale whenever the collection is mutated after a page was rendered.
    #[error("task index {index} out of range (collection has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Any other failure inside a handler.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Convenience constructor for stale-index failures.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

impl IntoResponse for AppError {
    /// Every handler failure becomes a 500 with a static plain-text body.
    ///
    /// Stale indices are client-caused, so they log at `warn`; everything
    /// else logs at `error`. The two classes stay distinct in the type so the
    /// status mapping is a single match arm to change.
    fn into_response(self) -> Response {
        match &self {
            AppError::IndexOutOfRange { index, len } => {
                tracing::warn!(index, len, "Request addressed a stale task index");
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Request handler failed");
            }
        }
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Result alias used by store operations and handlers.
pub type AppResult<T> = std::result::Result<T, AppError>;
