//! The feedback status workflow.
//!
//! `FeedbackService` is the only place status changes happen. Every update
//! follows the same protocol:
//! 1. Load the item (absent -> not found)
//! 2. Check the transition rule (illegal -> rejected, store untouched)
//! 3. Stamp the new status and `updated_at`, then save
//!
//! There is no lock around load-and-save. Two concurrent updates of the same
//! item both pass step 2 against the state they loaded and the last save wins.

use fb_core::entities::{FeedbackItem, NewFeedback};
use fb_core::enums::{FailureKind, FeedbackStatus};
use fb_core::errors::CoreError;
use fb_core::query::FeedbackQuery;
use fb_core::responses::{
    BulkFailure, BulkUpdateResult, FeedbackStats, Page, Pagination, StatusUpdate,
};

use crate::FeedbackDb;
use crate::error::{DatabaseError, FeedbackError};
use crate::helpers::now;
use crate::store::FeedbackStore;

/// Workflow operations over a [`FeedbackStore`].
pub struct FeedbackService<S = FeedbackDb> {
    store: S,
}

impl FeedbackService<FeedbackDb> {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self::new(FeedbackDb::open_local(db_path).await?))
    }
}

impl<S: FeedbackStore> FeedbackService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the store, e.g. to close it at shutdown.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// One page of items matching `query`.
    ///
    /// # Errors
    ///
    /// `FeedbackError::Storage` if the store fails.
    pub async fn get_all(&self, query: &FeedbackQuery) -> Result<Page<FeedbackItem>, FeedbackError> {
        let (data, total) = self
            .store
            .list(query)
            .await
            .map_err(|e| storage_failure("Failed to fetch feedback", None, e))?;
        Ok(Page {
            data,
            pagination: Pagination::new(query.page, query.limit, total),
        })
    }

    /// # Errors
    ///
    /// `CoreError::NotFound` if no item has `id`, else `FeedbackError::Storage`.
    pub async fn get_by_id(&self, id: &str) -> Result<FeedbackItem, FeedbackError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| lookup_failure(id, "Failed to fetch feedback", e))
    }

    /// Persist a new item in status `open`.
    ///
    /// # Errors
    ///
    /// `FeedbackError::Storage` if the store fails.
    pub async fn create(&self, input: NewFeedback) -> Result<FeedbackItem, FeedbackError> {
        let item = self
            .store
            .create(&input)
            .await
            .map_err(|e| storage_failure("Failed to create feedback", None, e))?;
        tracing::info!(id = %item.id, title = %item.title, "feedback created");
        Ok(item)
    }

    /// Move one item to `status`.
    ///
    /// The returned item carries the new status and an `updated_at` no
    /// earlier than the one it had before.
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if the item does not exist, including when it
    ///   is deleted between load and save.
    /// - `CoreError::InvalidTransition` if the rule forbids the move. Nothing
    ///   is written in that case.
    /// - `FeedbackError::Storage` if the store fails.
    pub async fn update_status(
        &self,
        id: &str,
        status: FeedbackStatus,
    ) -> Result<FeedbackItem, FeedbackError> {
        let mut item = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| lookup_failure(id, "Failed to update feedback status", e))?;

        let from = item.status;
        if !from.can_transition_to(status) {
            return Err(CoreError::InvalidTransition {
                id: id.to_string(),
                from,
                to: status,
            }
            .into());
        }

        item.status = status;
        item.updated_at = now().max(item.updated_at);

        let saved = self
            .store
            .save(&item)
            .await
            .map_err(|e| lookup_failure(id, "Failed to update feedback status", e))?;
        tracing::info!(id, %from, to = %status, "feedback status updated");
        Ok(saved)
    }

    /// Apply each update in order through [`Self::update_status`].
    ///
    /// Never fails as a whole: each entry ends up in exactly one of
    /// `updated` or `failed`. Repeated ids are processed in sequence, each
    /// against the state left by the previous one.
    pub async fn bulk_update_status(&self, updates: &[StatusUpdate]) -> BulkUpdateResult {
        let mut result = BulkUpdateResult::default();
        for update in updates {
            match self.update_status(&update.id, update.status).await {
                Ok(item) => result.updated.push(item),
                Err(err) => result.failed.push(BulkFailure {
                    id: update.id.clone(),
                    kind: failure_kind(&err),
                    reason: err.to_string(),
                }),
            }
        }

        if result.is_partial() {
            tracing::warn!(
                requested = updates.len(),
                updated = result.updated.len(),
                failed = result.failed.len(),
                "bulk status update had failures"
            );
        }
        result
    }

    /// Remove an item unconditionally.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` if no item has `id` (so deleting twice fails the
    /// second time), else `FeedbackError::Storage`.
    pub async fn delete(&self, id: &str) -> Result<(), FeedbackError> {
        self.store
            .delete_by_id(id)
            .await
            .map_err(|e| lookup_failure(id, "Failed to delete feedback", e))?;
        tracing::info!(id, "feedback deleted");
        Ok(())
    }

    /// Counts per status, zero-filled, in workflow order.
    ///
    /// # Errors
    ///
    /// `FeedbackError::Storage` if the store fails.
    pub async fn stats(&self) -> Result<FeedbackStats, FeedbackError> {
        let counts = self
            .store
            .count_by_status()
            .await
            .map_err(|e| storage_failure("Failed to fetch feedback statistics", None, e))?;
        Ok(FeedbackStats::from_counts(&counts))
    }

    /// Probe the store.
    ///
    /// # Errors
    ///
    /// `FeedbackError::Storage` if the store does not answer.
    pub async fn health(&self) -> Result<(), FeedbackError> {
        self.store
            .ping()
            .await
            .map_err(|e| storage_failure("Database unavailable", None, e))
    }
}

/// `NoResult` means the item is gone; anything else is a storage failure.
fn lookup_failure(id: &str, context: &'static str, err: DatabaseError) -> FeedbackError {
    match err {
        DatabaseError::NoResult => CoreError::NotFound { id: id.to_string() }.into(),
        other => storage_failure(context, Some(id), other),
    }
}

fn storage_failure(context: &'static str, id: Option<&str>, err: DatabaseError) -> FeedbackError {
    tracing::error!(error = %err, id, "{context}");
    FeedbackError::storage(context, err)
}

fn failure_kind(err: &FeedbackError) -> FailureKind {
    match err {
        FeedbackError::Core(CoreError::NotFound { .. }) => FailureKind::NotFound,
        FeedbackError::Core(CoreError::InvalidTransition { .. }) => FailureKind::InvalidTransition,
        // update_status produces no other core errors
        FeedbackError::Core(_) | FeedbackError::Storage { .. } => FailureKind::Storage,
    }
}
