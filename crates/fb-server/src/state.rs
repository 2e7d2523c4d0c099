//! Shared application state.

use fb_config::{FeedbackConfig, ListingConfig};
use fb_db::FeedbackDb;
use fb_db::service::FeedbackService;
use fb_db::store::FeedbackStore;

/// State shared by every handler, behind an `Arc`.
pub struct AppState<S: FeedbackStore = FeedbackDb> {
    pub service: FeedbackService<S>,
    pub listing: ListingConfig,
    pub max_bulk_items: usize,
}

impl<S: FeedbackStore> AppState<S> {
    #[must_use]
    pub fn new(service: FeedbackService<S>, config: &FeedbackConfig) -> Self {
        Self {
            service,
            listing: config.listing,
            max_bulk_items: config.server.max_bulk_items,
        }
    }
}
