//! Request validation: raw path, query, and JSON input into domain types.
//!
//! Field problems are collected and reported together as
//! `CoreError::Validation`. Problems with the request as a whole (bad id
//! format, wrong body shape) are `CoreError::BadRequest`.

use std::collections::HashMap;

use fb_config::ListingConfig;
use fb_core::entities::{NewFeedback, check_description, check_title};
use fb_core::enums::{FeedbackStatus, SortField, SortOrder};
use fb_core::errors::{CoreError, FieldError};
use fb_core::query::{DEFAULT_PAGE, FeedbackQuery};
use fb_core::responses::StatusUpdate;
use serde_json::Value;

const STATUS_CHOICES: &str = "open, in-progress, done";

/// Whether `id` has the store's id shape: exactly 24 hex digits.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate an id and return it in the store's lowercase spelling.
///
/// # Errors
///
/// `CoreError::BadRequest` if `id` is not 24 hex digits.
pub fn feedback_id(id: &str) -> Result<String, CoreError> {
    if is_valid_id(id) {
        Ok(id.to_ascii_lowercase())
    } else {
        Err(CoreError::BadRequest("Invalid Feedback ID format".to_string()))
    }
}

/// Build a listing query from raw query parameters.
///
/// `status`, `sortBy` and `sortOrder` must be recognized if present.
/// `page` and `limit` that don't parse or are out of range fall back to the
/// defaults. A blank `search` means no search.
///
/// # Errors
///
/// `CoreError::Validation` naming each unrecognized parameter.
pub fn list_query(
    params: &HashMap<String, String>,
    listing: &ListingConfig,
) -> Result<FeedbackQuery, CoreError> {
    let mut errors = Vec::new();

    let status = params.get("status").filter(|s| !s.is_empty()).and_then(|raw| {
        raw.parse::<FeedbackStatus>().map_or_else(
            |_| {
                errors.push(
                    FieldError::new("status", format!("Status must be one of: {STATUS_CHOICES}"))
                        .with_value(Value::String(raw.clone())),
                );
                None
            },
            Some,
        )
    });

    let sort_by = match params.get("sortBy").filter(|s| !s.is_empty()) {
        None => SortField::default(),
        Some(raw) => raw.parse::<SortField>().unwrap_or_else(|_| {
            errors.push(
                FieldError::new(
                    "sortBy",
                    "Sort field must be one of: createdAt, updatedAt, title",
                )
                .with_value(Value::String(raw.clone())),
            );
            SortField::default()
        }),
    };

    let sort_order = match params.get("sortOrder").filter(|s| !s.is_empty()) {
        None => SortOrder::default(),
        Some(raw) => raw.parse::<SortOrder>().unwrap_or_else(|_| {
            errors.push(
                FieldError::new("sortOrder", "Sort order must be one of: asc, desc")
                    .with_value(Value::String(raw.clone())),
            );
            SortOrder::default()
        }),
    };

    if !errors.is_empty() {
        return Err(CoreError::Validation(errors));
    }

    let page = params
        .get("page")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(DEFAULT_PAGE);
    let limit = listing.normalize_limit(
        params
            .get("limit")
            .and_then(|raw| raw.trim().parse::<u32>().ok()),
    );
    let search = params
        .get("search")
        .map(|raw| raw.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(FeedbackQuery {
        status,
        search,
        page,
        limit,
        sort_by,
        sort_order,
    })
}

/// Validate a create body `{title, description}`.
///
/// # Errors
///
/// `CoreError::BadRequest` if the body is not an object,
/// `CoreError::Validation` listing every bad field otherwise.
pub fn create_body(body: &Value) -> Result<NewFeedback, CoreError> {
    let Some(object) = body.as_object() else {
        return Err(CoreError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let mut errors = Vec::new();
    text_field(object.get("title"), "title", "Title", check_title, &mut errors);
    text_field(
        object.get("description"),
        "description",
        "Description",
        check_description,
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(CoreError::Validation(errors));
    }

    let title = object.get("title").and_then(Value::as_str).unwrap_or_default();
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    NewFeedback::new(title, description)
}

fn text_field(
    value: Option<&Value>,
    field: &str,
    label: &str,
    check: fn(&str) -> Option<FieldError>,
    errors: &mut Vec<FieldError>,
) {
    match value {
        None | Some(Value::Null) => errors.push(FieldError::new(field, format!("{label} is required"))),
        Some(Value::String(text)) => errors.extend(check(text)),
        Some(other) => errors.push(
            FieldError::new(field, format!("{label} must be a non-empty string"))
                .with_value(other.clone()),
        ),
    }
}

/// Validate a status body `{status}`.
///
/// # Errors
///
/// `CoreError::Validation` if `status` is missing or unrecognized.
pub fn status_body(body: &Value) -> Result<FeedbackStatus, CoreError> {
    status_value(body.get("status"), "status").map_err(|e| CoreError::Validation(vec![e]))
}

fn status_value(value: Option<&Value>, field: &str) -> Result<FeedbackStatus, FieldError> {
    match value {
        None | Some(Value::Null) => Err(FieldError::new(field, "Status is required")),
        Some(raw) => raw
            .as_str()
            .and_then(|s| s.parse::<FeedbackStatus>().ok())
            .ok_or_else(|| {
                FieldError::new(field, format!("Status must be one of: {STATUS_CHOICES}"))
                    .with_value(raw.clone())
            }),
    }
}

/// Validate a bulk body: an array of `{id, status}`.
///
/// The request is all-or-nothing: one malformed entry rejects it before any
/// update runs.
///
/// # Errors
///
/// `CoreError::BadRequest` for a non-array body or one longer than
/// `max_items`; `CoreError::Validation` naming each malformed entry field.
pub fn bulk_body(body: &Value, max_items: usize) -> Result<Vec<StatusUpdate>, CoreError> {
    let Some(entries) = body.as_array() else {
        return Err(CoreError::BadRequest(
            "Request body must be an array of {id, status} objects".to_string(),
        ));
    };
    if entries.len() > max_items {
        return Err(CoreError::BadRequest(format!(
            "Bulk update accepts at most {max_items} entries, got {}",
            entries.len()
        )));
    }

    let mut errors = Vec::new();
    let mut updates = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let id = match entry.get("id") {
            Some(Value::String(id)) if is_valid_id(id) => Some(id.to_ascii_lowercase()),
            Some(other) => {
                errors.push(
                    FieldError::new(format!("[{i}].id"), "Invalid Feedback ID format")
                        .with_value(other.clone()),
                );
                None
            }
            None => {
                errors.push(FieldError::new(format!("[{i}].id"), "Feedback ID is required"));
                None
            }
        };
        let status = status_value(entry.get("status"), &format!("[{i}].status"))
            .map_err(|e| errors.push(e))
            .ok();
        if let (Some(id), Some(status)) = (id, status) {
            updates.push(StatusUpdate::new(id, status));
        }
    }

    if errors.is_empty() {
        Ok(updates)
    } else {
        Err(CoreError::Validation(errors))
    }
}
