//! Route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use fb_db::store::FeedbackStore;
use serde_json::{Value, json};

use crate::error::{ApiError, SERVICE_UNAVAILABLE};
use crate::state::AppState;
use crate::validate;

type AppResult = Result<axum::response::Response, ApiError>;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    ApiError::not_found(format!("Route {} not found", uri.path()))
}

/// GET /
pub(crate) async fn handle_api_info() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Feedback Board API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "endpoints": {
            "health": "/api/feedback/health",
            "feedback": "/api/feedback",
            "stats": "/api/feedback/stats",
            "bulkUpdate": "/api/feedback/bulk-update",
        },
    }))
}

/// GET /api/feedback/health
pub(crate) async fn handle_health<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    match state.service.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Feedback API is healthy",
                "database": "connected",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Err(err) => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            SERVICE_UNAVAILABLE,
            err.to_string(),
        )
        .into_response(),
    }
}

/// GET /api/feedback
pub(crate) async fn handle_list<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> AppResult {
    let Query(params) = params?;
    let query = validate::list_query(&params, &state.listing)?;
    let page = state.service.get_all(&query).await?;
    Ok(Json(json!({
        "success": true,
        "data": page.data,
        "pagination": page.pagination,
    }))
    .into_response())
}

/// GET /api/feedback/stats
pub(crate) async fn handle_stats<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
) -> AppResult {
    let stats = state.service.stats().await?;
    Ok(Json(json!({ "success": true, "data": stats })).into_response())
}

/// POST /api/feedback
pub(crate) async fn handle_create<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult {
    let Json(body) = body?;
    let input = validate::create_body(&body)?;
    let item = state.service.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": item,
            "message": "Feedback created successfully",
        })),
    )
        .into_response())
}

/// GET /api/feedback/{id}
pub(crate) async fn handle_get<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> AppResult {
    let id = validate::feedback_id(&id)?;
    let item = state.service.get_by_id(&id).await?;
    Ok(Json(json!({ "success": true, "data": item })).into_response())
}

/// PATCH /api/feedback/{id}
pub(crate) async fn handle_update_status<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult {
    let id = validate::feedback_id(&id)?;
    let Json(body) = body?;
    let status = validate::status_body(&body)?;
    let item = state.service.update_status(&id, status).await?;
    Ok(Json(json!({
        "success": true,
        "data": item,
        "message": "Feedback status updated successfully",
    }))
    .into_response())
}

/// DELETE /api/feedback/{id}
pub(crate) async fn handle_delete<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> AppResult {
    let id = validate::feedback_id(&id)?;
    state.service.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Feedback deleted successfully",
    }))
    .into_response())
}

/// POST /api/feedback/bulk-update
pub(crate) async fn handle_bulk_update<S: FeedbackStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult {
    let Json(body) = body?;
    let updates = validate::bulk_body(&body, state.max_bulk_items)?;
    let result = state.service.bulk_update_status(&updates).await;
    Ok(Json(json!({
        "success": true,
        "data": result,
        "message": "Bulk update completed",
    }))
    .into_response())
}
