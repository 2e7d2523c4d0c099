//! In-memory record store.
//!
//! `MemoryStore` follows the same contract as [`crate::FeedbackDb`] and adds
//! hooks for tests: a counter of `save` calls and per-id save failures.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use fb_core::entities::{FeedbackItem, NewFeedback};
use fb_core::enums::FeedbackStatus;
use fb_core::query::FeedbackQuery;
use fb_core::responses::StatusCount;

use crate::error::DatabaseError;
use crate::helpers::now;
use crate::store::FeedbackStore;

#[derive(Default)]
struct State {
    items: BTreeMap<String, FeedbackItem>,
    next_id: u64,
    failing_saves: HashSet<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    save_calls: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `save` has been called, including failed calls.
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent `save` of `id` fail with a query error.
    pub async fn fail_saves_for(&self, id: &str) {
        self.state.lock().await.failing_saves.insert(id.to_string());
    }

    /// Insert an item verbatim, bypassing id and timestamp assignment.
    pub async fn insert_raw(&self, item: FeedbackItem) {
        self.state.lock().await.items.insert(item.id.clone(), item);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<FeedbackItem, DatabaseError> {
        self.state
            .lock()
            .await
            .items
            .get(id)
            .cloned()
            .ok_or(DatabaseError::NoResult)
    }

    async fn create(&self, input: &NewFeedback) -> Result<FeedbackItem, DatabaseError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let now = now();
        let item = FeedbackItem {
            id: format!("{:024x}", state.next_id),
            title: input.title().to_string(),
            description: input.description().to_string(),
            status: FeedbackStatus::Open,
            created_at: now,
            updated_at: now,
        };
        state.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn save(&self, item: &FeedbackItem) -> Result<FeedbackItem, DatabaseError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        if state.failing_saves.contains(&item.id) {
            return Err(DatabaseError::Query(format!(
                "injected save failure for {}",
                item.id
            )));
        }
        let stored = state.items.get_mut(&item.id).ok_or(DatabaseError::NoResult)?;
        stored.status = item.status;
        stored.updated_at = item.updated_at;
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DatabaseError> {
        self.state
            .lock()
            .await
            .items
            .remove(id)
            .map(|_| ())
            .ok_or(DatabaseError::NoResult)
    }

    async fn list(
        &self,
        query: &FeedbackQuery,
    ) -> Result<(Vec<FeedbackItem>, u64), DatabaseError> {
        let state = self.state.lock().await;
        let mut matching: Vec<&FeedbackItem> =
            state.items.values().filter(|item| query.matches(item)).collect();
        matching.sort_by(|a, b| query.compare(a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn count_by_status(&self) -> Result<Vec<StatusCount>, DatabaseError> {
        let state = self.state.lock().await;
        Ok(FeedbackStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: state.items.values().filter(|i| i.status == status).count() as u64,
            })
            .filter(|c| c.count > 0)
            .collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
