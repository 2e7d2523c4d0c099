//! The record store seam used by the workflow service.

use async_trait::async_trait;
use fb_core::entities::{FeedbackItem, NewFeedback};
use fb_core::query::FeedbackQuery;
use fb_core::responses::StatusCount;

use crate::error::DatabaseError;

/// Persistence for feedback items.
///
/// Lookups of a missing id return `Err(DatabaseError::NoResult)`; the service
/// turns that into a not-found outcome. Implementations hold no cache: every
/// call reads or writes the backing store.
///
/// Implementations must be `Send + Sync + 'static` to be shared through axum
/// application state.
#[async_trait]
pub trait FeedbackStore: Send + Sync + 'static {
    /// Load one item.
    async fn find_by_id(&self, id: &str) -> Result<FeedbackItem, DatabaseError>;

    /// Persist a new item in status `open`. The store assigns id and timestamps.
    async fn create(&self, input: &NewFeedback) -> Result<FeedbackItem, DatabaseError>;

    /// Replace the mutable fields (`status`, `updated_at`) of an existing item.
    ///
    /// Returns `NoResult` if the item no longer exists.
    async fn save(&self, item: &FeedbackItem) -> Result<FeedbackItem, DatabaseError>;

    /// Remove an item. Returns `NoResult` if it did not exist.
    async fn delete_by_id(&self, id: &str) -> Result<(), DatabaseError>;

    /// One page of matching items, plus the total number of matches.
    async fn list(&self, query: &FeedbackQuery)
    -> Result<(Vec<FeedbackItem>, u64), DatabaseError>;

    /// Number of items per status. Statuses with no items may be omitted.
    async fn count_by_status(&self) -> Result<Vec<StatusCount>, DatabaseError>;

    /// Liveness check.
    async fn ping(&self) -> Result<(), DatabaseError>;
}
