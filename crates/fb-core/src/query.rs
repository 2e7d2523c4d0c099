//! Listing query: status filter, free-text search, sort, and page window.
//!
//! A `FeedbackQuery` is assumed sanitized by the time it reaches a store:
//! `page >= 1` and `1 <= limit <= MAX_LIMIT`. The HTTP validator and the CLI
//! are responsible for normalizing raw input.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::FeedbackItem;
use crate::enums::{FeedbackStatus, SortField, SortOrder};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeedbackStatus>,
    /// Case-insensitive substring matched against title OR description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for FeedbackQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl FeedbackQuery {
    /// Number of matching rows preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// The search needle, if a non-blank one was given.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether an item passes the status filter and search.
    ///
    /// Search folds ASCII letters only, the same way SQLite's `lower()` does.
    #[must_use]
    pub fn matches(&self, item: &FeedbackItem) -> bool {
        if self.status.is_some_and(|status| status != item.status) {
            return false;
        }
        match self.search_term() {
            None => true,
            Some(needle) => {
                let needle = needle.to_ascii_lowercase();
                item.title.to_ascii_lowercase().contains(&needle)
                    || item.description.to_ascii_lowercase().contains(&needle)
            }
        }
    }

    /// Listing order: the sort field, then id, both in the requested direction.
    #[must_use]
    pub fn compare(&self, a: &FeedbackItem, b: &FeedbackItem) -> Ordering {
        let by_field = match self.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Title => a.title.cmp(&b.title),
        };
        let ordering = by_field.then_with(|| a.id.cmp(&b.id));
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
