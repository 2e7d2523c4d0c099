//! Response types returned by the workflow service.
//!
//! These structs define the JSON shape of list pages, bulk update outcomes,
//! and statistics, as served by the HTTP API and printed by the CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::FeedbackItem;
use crate::enums::{FailureKind, FeedbackStatus};

/// Pagination metadata for a listing page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Compute metadata for `page` of `limit` items out of `total` matches.
    ///
    /// `limit` is assumed to be at least 1.
    #[must_use]
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = total.div_ceil(u64::from(limit.max(1)));
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// One requested status change in a bulk update.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: String,
    pub status: FeedbackStatus,
}

impl StatusUpdate {
    #[must_use]
    pub fn new(id: impl Into<String>, status: FeedbackStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

/// A bulk update entry that did not apply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkFailure {
    pub id: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// Outcome of a bulk status update: every entry lands in exactly one list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkUpdateResult {
    pub updated: Vec<FeedbackItem>,
    pub failed: Vec<BulkFailure>,
}

impl BulkUpdateResult {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusCount {
    pub status: FeedbackStatus,
    pub count: u64,
}

/// Aggregate counts over all feedback items.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total: u64,
    /// One entry per status, in workflow order, including zero counts.
    pub status_counts: Vec<StatusCount>,
    pub open_count: u64,
    pub in_progress_count: u64,
    pub done_count: u64,
}

impl FeedbackStats {
    /// Build stats from per-status counts. Statuses absent from `counts` are zero.
    #[must_use]
    pub fn from_counts(counts: &[StatusCount]) -> Self {
        let count_of = |status: FeedbackStatus| -> u64 {
            counts
                .iter()
                .filter(|c| c.status == status)
                .map(|c| c.count)
                .sum()
        };
        let status_counts: Vec<StatusCount> = FeedbackStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: count_of(status),
            })
            .collect();
        Self {
            total: status_counts.iter().map(|c| c.count).sum(),
            open_count: count_of(FeedbackStatus::Open),
            in_progress_count: count_of(FeedbackStatus::InProgress),
            done_count: count_of(FeedbackStatus::Done),
            status_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pagination_middle_page() {
        let p = Pagination::new(2, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn pagination_last_page() {
        let p = Pagination::new(3, 10, 25);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn pagination_empty_collection() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        for total in 0..=57_u64 {
            for limit in 1..=12_u32 {
                let expected = (total + u64::from(limit) - 1) / u64::from(limit);
                assert_eq!(
                    Pagination::new(1, limit, total).total_pages,
                    expected,
                    "total={total} limit={limit}"
                );
            }
        }
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(1, 10, 11)).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrev"], false);
    }

    #[test]
    fn stats_fill_missing_statuses_with_zero() {
        let stats = FeedbackStats::from_counts(&[StatusCount {
            status: FeedbackStatus::Done,
            count: 4,
        }]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.open_count, 0);
        assert_eq!(stats.in_progress_count, 0);
        assert_eq!(stats.done_count, 4);
        assert_eq!(
            stats.status_counts,
            vec![
                StatusCount {
                    status: FeedbackStatus::Open,
                    count: 0
                },
                StatusCount {
                    status: FeedbackStatus::InProgress,
                    count: 0
                },
                StatusCount {
                    status: FeedbackStatus::Done,
                    count: 4
                },
            ]
        );
    }

    #[test]
    fn bulk_result_partial_flag() {
        let mut result = BulkUpdateResult::default();
        assert!(!result.is_partial());
        result.failed.push(BulkFailure {
            id: "x".into(),
            kind: FailureKind::NotFound,
            reason: "Feedback not found: x".into(),
        });
        assert!(result.is_partial());
    }
}
