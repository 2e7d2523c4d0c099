//! HTTP API tests against a live server on an ephemeral port, backed by the
//! in-memory store.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use fb_config::FeedbackConfig;
use fb_core::entities::FeedbackItem;
use fb_core::enums::FeedbackStatus;
use fb_db::memory::MemoryStore;
use fb_db::service::FeedbackService;
use fb_server::AppState;

struct TestApp {
    base: String,
    client: reqwest::Client,
    state: Arc<AppState<MemoryStore>>,
}

impl TestApp {
    async fn spawn() -> Self {
        Self::spawn_with(FeedbackConfig::default()).await
    }

    async fn spawn_with(config: FeedbackConfig) -> Self {
        let state = Arc::new(AppState::new(
            FeedbackService::new(MemoryStore::new()),
            &config,
        ));
        let app = fb_server::router(Arc::clone(&state), &config.server);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            state,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status(), resp.json().await.unwrap())
    }

    async fn send_json(&self, method: reqwest::Method, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        (resp.status(), resp.json().await.unwrap())
    }

    async fn create(&self, title: &str, description: &str) -> FeedbackItem {
        let (status, body) = self
            .send_json(
                reqwest::Method::POST,
                "/api/feedback",
                &json!({"title": title, "description": description}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        serde_json::from_value(body["data"].clone()).unwrap()
    }

    async fn patch_status(&self, id: &str, status: &str) -> (StatusCode, Value) {
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/api/feedback/{id}"),
            &json!({ "status": status }),
        )
        .await
    }
}

fn assert_envelope(body: &Value, status: StatusCode, code: &str) {
    assert_eq!(body["success"], false, "{body}");
    assert_eq!(body["statusCode"], status.as_u16(), "{body}");
    assert_eq!(body["code"], code, "{body}");
    assert!(body["message"].is_string(), "{body}");
    assert!(body["error"].is_string(), "{body}");
}

// ---------------------------------------------------------------------------
// Info and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_info_and_health() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["endpoints"]["feedback"], "/api/feedback");

    let (status, body) = app.get("/api/feedback/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn unknown_route_is_enveloped_404() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&body, StatusCode::NOT_FOUND, "NOT_FOUND");
    assert_eq!(body["message"], "Route /api/nothing-here not found");
}

// ---------------------------------------------------------------------------
// Workflow over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fix_login_bug_over_http() {
    let app = TestApp::spawn().await;
    let item = app.create("Fix login bug", "Login fails on mobile").await;
    assert_eq!(item.status.as_str(), "open");

    let (status, body) = app.patch_status(&item.id, "in-progress").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "in-progress");
    assert_eq!(body["message"], "Feedback status updated successfully");

    let (status, body) = app.patch_status(&item.id, "done").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "done");

    let (status, body) = app.patch_status(&item.id, "open").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "INVALID_TRANSITION");
    assert_eq!(body["message"], "Invalid status transition from done to open");

    let (status, body) = app.get(&format!("/api/feedback/{}", item.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "done");
    assert_eq!(body["data"]["_id"], item.id.as_str());
}

#[tokio::test]
async fn illegal_transition_never_writes() {
    let app = TestApp::spawn().await;
    let item = app.create("t", "d").await;

    let (status, _) = app.patch_status(&item.id, "open").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.state.service.store().save_calls(), 0);
}

#[tokio::test]
async fn create_validation_reports_every_field() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .send_json(
            reqwest::Method::POST,
            "/api/feedback",
            &json!({"title": "   ", "description": "x".repeat(501)}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "description"]);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;
    let resp = app
        .client
        .post(app.url("/api/feedback"))
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_envelope(&body, StatusCode::BAD_REQUEST, "BAD_REQUEST");
}

#[tokio::test]
async fn bad_ids_and_missing_items() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/feedback/not-an-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "BAD_REQUEST");
    assert_eq!(body["message"], "Invalid Feedback ID format");

    let missing = "ffffffffffffffffffffffff";
    let (status, body) = app.get(&format!("/api/feedback/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&body, StatusCode::NOT_FOUND, "NOT_FOUND");

    let (status, body) = app.patch_status(missing, "done").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&body, StatusCode::NOT_FOUND, "NOT_FOUND");

    let (status, body) = app.patch_status(missing, "archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_twice() {
    let app = TestApp::spawn().await;
    let item = app.create("t", "d").await;
    let path = format!("/api/feedback/{}", item.id);

    let resp = app.client.delete(app.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Feedback deleted successfully");

    let resp = app.client.delete(app.url(&path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

async fn seed_lettered(app: &TestApp, id: &str, status: FeedbackStatus) {
    let now = chrono::Utc::now();
    app.state
        .service
        .store()
        .insert_raw(FeedbackItem {
            id: id.into(),
            title: "Fix login bug".into(),
            description: "Login fails on mobile".into(),
            status,
            created_at: now,
            updated_at: now,
        })
        .await;
}

#[tokio::test]
async fn uppercase_ids_resolve_to_the_stored_item() {
    let app = TestApp::spawn().await;
    let id = "65f1a2b3c4d5e6f708192a3b";
    let upper = id.to_ascii_uppercase();
    seed_lettered(&app, id, FeedbackStatus::Open).await;

    let (status, body) = app.get(&format!("/api/feedback/{upper}")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["_id"], id);

    let (status, body) = app.patch_status(&upper, "in-progress").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "in-progress");

    let resp = app
        .client
        .delete(app.url(&format!("/api/feedback/{upper}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let (status, _) = app.get(&format!("/api/feedback/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_update_accepts_uppercase_ids() {
    let app = TestApp::spawn().await;
    let id = "65f1a2b3c4d5e6f708192a3c";
    seed_lettered(&app, id, FeedbackStatus::Open).await;

    let (status, body) = app
        .send_json(
            reqwest::Method::POST,
            "/api/feedback/bulk-update",
            &json!([{"id": id.to_ascii_uppercase(), "status": "done"}]),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["updated"][0]["_id"], id);
    assert_eq!(body["data"]["failed"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn storage_failure_is_generic_500() {
    let app = TestApp::spawn().await;
    let item = app.create("t", "d").await;
    app.state.service.store().fail_saves_for(&item.id).await;

    let (status, body) = app.patch_status(&item.id, "done").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_envelope(&body, StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR");
    assert_eq!(body["message"], "Failed to update feedback status");
    assert!(!body.to_string().contains("injected"));
}

// ---------------------------------------------------------------------------
// Listing, stats, bulk
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_search_and_pagination() {
    let app = TestApp::spawn().await;
    app.create("Alpha bug", "crashes").await;
    app.create("Beta issue", "slow page").await;
    for i in 0..10 {
        app.create(&format!("filler {i}"), "nothing to see").await;
    }

    let (status, body) = app.get("/api/feedback?search=bug").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Alpha bug");

    let (status, body) = app.get("/api/feedback?limit=5&page=3&sortBy=title&sortOrder=asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 12);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Out-of-range paging falls back to defaults.
    let (status, body) = app.get("/api/feedback?limit=1000&page=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["page"], 1);

    let (status, body) = app.get("/api/feedback?status=archived").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn stats_include_zero_counts() {
    let app = TestApp::spawn().await;
    let item = app.create("a", "d").await;
    app.create("b", "d").await;
    app.patch_status(&item.id, "done").await;

    let (status, body) = app.get("/api/feedback/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["openCount"], 1);
    assert_eq!(body["data"]["inProgressCount"], 0);
    assert_eq!(body["data"]["doneCount"], 1);
    assert_eq!(body["data"]["statusCounts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn bulk_update_mixed_outcomes() {
    let app = TestApp::spawn().await;
    let a = app.create("A", "open one").await;
    let b = app.create("B", "finished one").await;
    app.patch_status(&b.id, "done").await;

    let (status, body) = app
        .send_json(
            reqwest::Method::POST,
            "/api/feedback/bulk-update",
            &json!([
                {"id": a.id, "status": "done"},
                {"id": b.id, "status": "open"},
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["updated"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["updated"][0]["_id"], a.id.as_str());
    assert_eq!(body["data"]["failed"][0]["id"], b.id.as_str());
    assert_eq!(body["data"]["failed"][0]["kind"], "invalid_transition");
}

#[tokio::test]
async fn bulk_update_rejects_malformed_requests_whole() {
    let mut config = FeedbackConfig::default();
    config.server.max_bulk_items = 2;
    let app = TestApp::spawn_with(config).await;
    let a = app.create("A", "d").await;

    let (status, body) = app
        .send_json(
            reqwest::Method::POST,
            "/api/feedback/bulk-update",
            &json!([
                {"id": a.id, "status": "done"},
                {"id": "bad", "status": "done"},
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(app.state.service.store().save_calls(), 0);

    let (status, body) = app
        .send_json(
            reqwest::Method::POST,
            "/api/feedback/bulk-update",
            &json!([
                {"id": a.id, "status": "done"},
                {"id": a.id, "status": "done"},
                {"id": a.id, "status": "done"},
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, StatusCode::BAD_REQUEST, "BAD_REQUEST");
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let app = TestApp::spawn().await;
    let resp = app
        .client
        .get(app.url("/api/feedback"))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}
