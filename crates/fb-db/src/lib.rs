//! # fb-db
//!
//! Record store and status workflow service for the feedback tracker.
//!
//! [`store::FeedbackStore`] is the seam between the workflow and persistence.
//! [`FeedbackDb`] implements it on an embedded libSQL database;
//! [`memory::MemoryStore`] implements it in memory for tests and tooling.
//! [`service::FeedbackService`] runs the workflow on top of either.

pub mod error;
pub mod helpers;
pub mod memory;
mod migrations;
pub mod repos;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use error::DatabaseError;
use fb_config::DatabaseConfig;
use libsql::Builder;

/// Handle to the libSQL database holding feedback items.
///
/// Every store operation runs under the configured operation timeout, so a
/// stuck database surfaces as [`DatabaseError::Timeout`] instead of hanging
/// the caller.
pub struct FeedbackDb {
    db: libsql::Database,
    conn: libsql::Connection,
    op_timeout: Duration,
}

impl FeedbackDb {
    /// Open a local database with default timeouts.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open(&DatabaseConfig {
            path: path.to_string(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Open the database described by `config`, creating its parent
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory, database, pragmas, or
    /// migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.is_in_memory()
            && let Some(parent) = Path::new(&config.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("cannot create database directory {}", parent.display())
            })?;
        }

        let db = Builder::new_local(&config.path).build().await?;
        let conn = db.connect()?;

        // Per-connection; lock contention waits instead of failing with SQLITE_BUSY.
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};",
            config.busy_timeout_ms
        ))
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let fb_db = Self {
            db,
            conn,
            op_timeout: config.operation_timeout(),
        };
        fb_db.run_migrations().await?;
        tracing::debug!(path = %config.path, "feedback database opened");
        Ok(fb_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// Generate a new item id: 24 lowercase hex characters from `randomblob(12)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT lower(hex(randomblob(12)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Release the connection. Call after the server has drained.
    pub fn close(self) {
        drop(self.conn);
        drop(self.db);
        tracing::debug!("feedback database closed");
    }

    /// Run `fut` under the operation timeout.
    pub(crate) async fn bounded<T, F>(&self, fut: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| DatabaseError::Timeout(self.op_timeout))?
    }
}
