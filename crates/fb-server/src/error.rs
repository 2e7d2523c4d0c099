//! Error envelope for API responses.
//!
//! Every failure is rendered as
//! `{"success": false, "error", "message", "statusCode", "code", "errors"?}`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fb_core::errors::{CoreError, FieldError};
use fb_db::error::FeedbackError;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Vec<FieldError>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND, message)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => Self::not_found(err.to_string()),
            CoreError::InvalidTransition { .. } => {
                Self::new(StatusCode::BAD_REQUEST, INVALID_TRANSITION, err.to_string())
            }
            CoreError::Validation(errors) => Self {
                status: StatusCode::BAD_REQUEST,
                code: VALIDATION_ERROR,
                message: "Validation failed".to_string(),
                errors,
            },
            CoreError::BadRequest(message) => {
                Self::new(StatusCode::BAD_REQUEST, BAD_REQUEST, message)
            }
        }
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Core(core) => core.into(),
            // The service already logged the source; only the context goes out.
            FeedbackError::Storage { context, .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, DATABASE_ERROR, context)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                PAYLOAD_TOO_LARGE,
                "Request body is too large",
            );
        }
        Self::new(
            StatusCode::BAD_REQUEST,
            BAD_REQUEST,
            format!("Invalid JSON payload: {}", rejection.body_text()),
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            BAD_REQUEST,
            format!("Invalid query string: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = %self.message, "request failed");
        } else {
            tracing::warn!(status = %self.status, code = self.code, message = %self.message, "request rejected");
        }

        let mut body = serde_json::json!({
            "success": false,
            "error": self.status.canonical_reason().unwrap_or("Error"),
            "message": self.message,
            "statusCode": self.status.as_u16(),
            "code": self.code,
        });
        if !self.errors.is_empty() {
            body["errors"] = serde_json::to_value(&self.errors).unwrap_or_default();
        }
        (self.status, Json(body)).into_response()
    }
}
