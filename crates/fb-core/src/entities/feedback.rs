use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FeedbackStatus;
use crate::errors::{CoreError, FieldError};

/// Maximum title length, in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length, in characters, after trimming.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A piece of user feedback moving through the status workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a feedback item.
///
/// Fields are trimmed and length-checked on construction, so a `NewFeedback`
/// can always be persisted without violating the non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    title: String,
    description: String,
}

impl NewFeedback {
    /// Trim and validate a title and description.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every field that failed.
    pub fn new(title: &str, description: &str) -> Result<Self, CoreError> {
        let errors: Vec<FieldError> = [check_title(title), check_description(description)]
            .into_iter()
            .flatten()
            .collect();
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }
        Ok(Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Check a raw title. Returns the failure, if any.
#[must_use]
pub fn check_title(raw: &str) -> Option<FieldError> {
    check_text("title", "Title", raw, TITLE_MAX_CHARS)
}

/// Check a raw description. Returns the failure, if any.
#[must_use]
pub fn check_description(raw: &str) -> Option<FieldError> {
    check_text("description", "Description", raw, DESCRIPTION_MAX_CHARS)
}

fn check_text(field: &str, label: &str, raw: &str, max_chars: usize) -> Option<FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(
            FieldError::new(field, format!("{label} must be a non-empty string"))
                .with_value(serde_json::Value::String(raw.to_string())),
        );
    }
    if trimmed.chars().count() > max_chars {
        return Some(FieldError::new(
            field,
            format!("{label} must be no more than {max_chars} characters"),
        ));
    }
    None
}
