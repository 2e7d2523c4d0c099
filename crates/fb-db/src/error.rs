//! Error types for fb-db.

use std::time::Duration;

use fb_core::errors::CoreError;
use thiserror::Error;

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The operation did not finish within the configured bound.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors returned by [`crate::service::FeedbackService`].
///
/// `Core` carries expected outcomes (not found, illegal transition, bad
/// input). `Storage` wraps a store failure; its `Display` is only the generic
/// `context`, so the underlying detail never reaches API clients. The source
/// stays reachable through `std::error::Error::source` for logs.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl FeedbackError {
    #[must_use]
    pub const fn storage(context: &'static str, source: DatabaseError) -> Self {
        Self::Storage { context, source }
    }

    /// The domain error, if this is an expected outcome rather than a storage failure.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            Self::Storage { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }
}
