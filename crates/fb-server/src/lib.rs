//! # fb-server
//!
//! HTTP JSON API over the feedback status workflow, using `axum` + `tokio`.
//!
//! Endpoints:
//! - GET    /                            - API info
//! - GET    /api/feedback/health         - Store liveness (200 / 503)
//! - GET    /api/feedback                - Filtered, sorted, paginated listing
//! - GET    /api/feedback/stats          - Counts per status
//! - POST   /api/feedback                - Create an item
//! - POST   /api/feedback/bulk-update    - Apply many status changes
//! - GET    /api/feedback/{id}           - Fetch one item
//! - PATCH  /api/feedback/{id}           - Change an item's status
//! - DELETE /api/feedback/{id}           - Delete an item
//!
//! All responses use Content-Type: application/json. Errors use the envelope
//! described in [`error`].

pub mod error;
mod handlers;
mod state;
pub mod validate;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use fb_config::{FeedbackConfig, ServerConfig};
use fb_db::FeedbackDb;
use fb_db::error::DatabaseError;
use fb_db::service::FeedbackService;
use fb_db::store::FeedbackStore;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

use self::handlers::{
    handle_api_info, handle_bulk_update, handle_create, handle_delete, handle_get, handle_health,
    handle_list, handle_not_found, handle_stats, handle_update_status,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the application router.
pub fn router<S: FeedbackStore>(state: Arc<AppState<S>>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handle_api_info))
        .route("/api/feedback/health", get(handle_health::<S>))
        .route("/api/feedback/stats", get(handle_stats::<S>))
        .route("/api/feedback/bulk-update", post(handle_bulk_update::<S>))
        .route(
            "/api/feedback",
            get(handle_list::<S>).post(handle_create::<S>),
        )
        .route(
            "/api/feedback/{id}",
            get(handle_get::<S>)
                .patch(handle_update_status::<S>)
                .delete(handle_delete::<S>),
        )
        .fallback(handle_not_found)
        .layer(cors_layer(server))
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if server.allows_any_origin() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain
/// in-flight requests.
///
/// # Errors
///
/// Returns the underlying I/O error if the server fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Open the configured database, serve the API until Ctrl+C or SIGTERM, then
/// close the database.
///
/// # Errors
///
/// Returns `ServerError` if the database cannot be opened or the listener
/// cannot bind.
pub async fn run(config: &FeedbackConfig) -> Result<(), ServerError> {
    let db = FeedbackDb::open(&config.database).await?;
    let state = Arc::new(AppState::new(FeedbackService::new(db), config));
    let app = router(Arc::clone(&state), &config.server);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "feedback API listening");

    serve(listener, app, shutdown_signal()).await?;
    tracing::info!("server shut down");

    match Arc::try_unwrap(state) {
        Ok(state) => state.service.into_store().close(),
        Err(_) => tracing::warn!("application state still shared at shutdown; database closed on drop"),
    }
    Ok(())
}

/// Wait for Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("received shutdown signal");
}
