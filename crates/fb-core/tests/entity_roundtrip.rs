//! Serde roundtrip and JsonSchema validation tests for wire types.

use chrono::Utc;
use schemars::schema_for;
use fb_core::entities::FeedbackItem;
use fb_core::enums::{FailureKind, FeedbackStatus, SortField, SortOrder};
use fb_core::query::FeedbackQuery;
use fb_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_item() -> FeedbackItem {
    FeedbackItem {
        id: "65f1a2b3c4d5e6f708192a3b".into(),
        title: "Fix login bug".into(),
        description: "Login fails on mobile".into(),
        status: FeedbackStatus::InProgress,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

roundtrip_and_validate!(feedback_item_roundtrip, FeedbackItem, sample_item());

roundtrip_and_validate!(
    query_roundtrip,
    FeedbackQuery,
    FeedbackQuery {
        status: Some(FeedbackStatus::Open),
        search: Some("login".into()),
        page: 2,
        limit: 25,
        sort_by: SortField::Title,
        sort_order: SortOrder::Asc,
    }
);

roundtrip_and_validate!(
    page_roundtrip,
    Page<FeedbackItem>,
    Page {
        data: vec![sample_item()],
        pagination: Pagination::new(1, 10, 1),
    }
);

roundtrip_and_validate!(
    bulk_result_roundtrip,
    BulkUpdateResult,
    BulkUpdateResult {
        updated: vec![sample_item()],
        failed: vec![BulkFailure {
            id: "65f1a2b3c4d5e6f708192a3c".into(),
            kind: FailureKind::InvalidTransition,
            reason: "Invalid status transition from done to open".into(),
        }],
    }
);

roundtrip_and_validate!(
    stats_roundtrip,
    FeedbackStats,
    FeedbackStats::from_counts(&[
        StatusCount {
            status: FeedbackStatus::Open,
            count: 3,
        },
        StatusCount {
            status: FeedbackStatus::Done,
            count: 1,
        },
    ])
);

roundtrip_and_validate!(
    status_update_roundtrip,
    StatusUpdate,
    StatusUpdate::new("65f1a2b3c4d5e6f708192a3b", FeedbackStatus::Done)
);

// --- Schema rejection tests ---

#[test]
fn schema_rejects_item_without_title() {
    let schema = serde_json::to_value(schema_for!(FeedbackItem)).unwrap();
    let invalid = serde_json::json!({
        "_id": "65f1a2b3c4d5e6f708192a3b",
        "description": "d",
        "status": "open",
        "createdAt": "2026-02-08T12:00:00Z",
        "updatedAt": "2026-02-08T12:00:00Z"
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject item without 'title'");
}

#[test]
fn schema_rejects_unknown_status() {
    let schema = serde_json::to_value(schema_for!(StatusUpdate)).unwrap();
    let invalid = serde_json::json!({
        "id": "65f1a2b3c4d5e6f708192a3b",
        "status": "in_progress"
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject snake_case status");
}
