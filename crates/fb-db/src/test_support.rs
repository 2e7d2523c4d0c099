//! Shared test utilities for fb-db unit tests.

pub(crate) mod helpers {
    use fb_core::entities::{FeedbackItem, NewFeedback};
    use fb_core::enums::FeedbackStatus;

    use crate::FeedbackDb;
    use crate::memory::MemoryStore;
    use crate::service::FeedbackService;
    use crate::store::FeedbackStore;

    /// In-memory libSQL database with migrations applied.
    pub async fn test_db() -> FeedbackDb {
        FeedbackDb::open_local(":memory:").await.unwrap()
    }

    pub fn memory_service() -> FeedbackService<MemoryStore> {
        FeedbackService::new(MemoryStore::new())
    }

    pub fn input(title: &str, description: &str) -> NewFeedback {
        NewFeedback::new(title, description).unwrap()
    }

    /// Create an item and force it into `status` without going through the
    /// workflow or touching the save counter.
    pub async fn seed_item(store: &MemoryStore, status: FeedbackStatus) -> FeedbackItem {
        let mut item = store.create(&input("seeded", "seeded item")).await.unwrap();
        item.status = status;
        store.insert_raw(item.clone()).await;
        item
    }
}
