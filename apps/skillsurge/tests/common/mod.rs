//! In-process fake of the SkillSurge backend, served by axum on a loopback
//! port. Each test gets its own server and inspects the recorded state.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use skillsurge::{ApiClient, SessionStore};

pub const USER_ID: &str = "user-1";

#[derive(Debug)]
pub struct Backend {
    /// The only access token the server currently accepts.
    pub access_token: String,
    pub refresh_token: String,
    pub reject_refresh: bool,
    /// Refresh answers 200 with `success: false` instead of new tokens.
    pub refresh_unsuccessful: bool,
    pub dashboard_down: bool,
    /// Serve as an older backend without comprehensive generation.
    pub comprehensive_missing: bool,
    pub refresh_calls: usize,
    pub logout_calls: usize,
    pub upload_attempts: usize,
    /// Bearer tokens in arrival order, `-` for none.
    pub seen_tokens: Vec<String>,
    pub task_updates: Vec<(String, Value)>,
    /// Generate calls as (endpoint, body).
    pub generate_requests: Vec<(String, Value)>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            access_token: "access-0".to_string(),
            refresh_token: "refresh-0".to_string(),
            reject_refresh: false,
            refresh_unsuccessful: false,
            dashboard_down: false,
            comprehensive_missing: false,
            refresh_calls: 0,
            logout_calls: 0,
            upload_attempts: 0,
            seen_tokens: Vec::new(),
            task_updates: Vec::new(),
            generate_requests: Vec::new(),
        }
    }
}

pub type Shared = Arc<Mutex<Backend>>;

/// Starts the fake and returns its API base URL.
pub async fn spawn(backend: Backend) -> (String, Shared) {
    let state = Arc::new(Mutex::new(backend));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), state)
}

pub fn client(base_url: &str, session: Arc<SessionStore>) -> ApiClient {
    ApiClient::new(base_url, session, Duration::from_secs(5)).unwrap()
}

/// A session holding an access token the server no longer accepts.
pub fn stale_session() -> Arc<SessionStore> {
    let session = SessionStore::in_memory();
    session
        .set_tokens("stale".to_string(), "refresh-0".to_string())
        .unwrap();
    session.set_user_id(USER_ID.to_string()).unwrap();
    Arc::new(session)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/profile/upload", post(upload))
        .route("/api/dashboard/:user_id", get(dashboard))
        .route("/api/dashboard/:user_id/daily", get(daily))
        .route("/api/roadmap/generate", post(generate))
        .route("/api/roadmap/generate-comprehensive", post(generate_comprehensive))
        .route("/api/roadmap/:user_id", put(replace_roadmap))
        .route("/api/roadmap/:user_id/task/:task_id", put(update_task))
        .with_state(state)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Invalid or expired token"})),
    )
        .into_response()
}

/// Records the bearer token and checks it against the current one.
fn authorize(state: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("-")
        .to_string();
    let mut backend = state.lock().unwrap();
    let ok = token == backend.access_token;
    backend.seen_tokens.push(token);
    if ok {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

fn user(email: &str) -> Value {
    json!({"id": USER_ID, "email": email, "full_name": "Ada Lovelace"})
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["password"] == "wrong" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid login credentials"})),
        )
            .into_response();
    }
    let backend = state.lock().unwrap();
    Json(json!({
        "success": true,
        "user": user(body["email"].as_str().unwrap_or_default()),
        "access_token": backend.access_token,
        "refresh_token": backend.refresh_token,
    }))
    .into_response()
}

async fn logout(State(state): State<Shared>) -> Json<Value> {
    state.lock().unwrap().logout_calls += 1;
    Json(json!({"success": true}))
}

async fn refresh(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    backend.refresh_calls += 1;
    if backend.reject_refresh || body["refresh_token"] != backend.refresh_token.as_str() {
        return unauthorized();
    }
    if backend.refresh_unsuccessful {
        return Json(json!({"success": false, "error": "Refresh token revoked"})).into_response();
    }
    let n = backend.refresh_calls;
    backend.access_token = format!("access-{n}");
    backend.refresh_token = format!("refresh-{n}");
    Json(json!({
        "success": true,
        "access_token": backend.access_token,
        "refresh_token": backend.refresh_token,
    }))
    .into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"success": true, "user": user("ada@example.com")})).into_response()
}

async fn upload(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    state.lock().unwrap().upload_attempts += 1;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let body = String::from_utf8_lossy(&body);
    if !body.contains("name=\"file\"") || !body.contains("filename=\"resume.pdf\"") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Only PDF files are supported"})),
        )
            .into_response();
    }
    Json(json!({
        "success": true,
        "profile": {
            "id": "p-1",
            "userId": "user-42",
            "skills": ["Rust", "SQL"],
        }
    }))
    .into_response()
}

async fn dashboard(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if state.lock().unwrap().dashboard_down {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "database unavailable"})),
        )
            .into_response();
    }
    Json(json!({
        "userId": user_id,
        "stats": {"streak": 4, "problemsSolved": 11, "skillMatch": 81.4, "daysUntilReady": 30},
        "targetRole": "Data Engineer",
        "progressData": [{"week": "W1", "score": 40, "problems": 3}],
    }))
    .into_response()
}

async fn daily(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({
        "userId": user_id,
        "dailyTask": {"id": "p-56", "title": "Merge Intervals", "difficulty": "Medium"},
        "completedToday": false,
        "streak": 4,
    }))
    .into_response()
}

/// Echoes the stored plan back in the `{success, roadmap}` envelope.
async fn replace_roadmap(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(_user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"success": true, "roadmap": body})).into_response()
}

async fn update_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((_user_id, task_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    state
        .lock()
        .unwrap()
        .task_updates
        .push((task_id.clone(), body.clone()));

    let completed = body["completed"].as_bool().unwrap_or_default();
    Json(json!({
        "success": true,
        "task": {"id": task_id, "title": "whatever", "completed": completed},
        "overallProgress": {"completed": 7, "total": 10, "percentage": 70},
        "isFastLearner": true,
        "bonusTopicsAdded": true,
        "bonusTopics": {
            "message": "Ahead of schedule!",
            "tasks": [
                {"title": "Window functions deep dive", "type": "reading", "duration": "1h"},
                {"title": "Query plan puzzles", "type": "problem", "duration": "45m"},
            ]
        }
    }))
    .into_response()
}

async fn generate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    state
        .lock()
        .unwrap()
        .generate_requests
        .push(("generate".to_string(), body.clone()));
    Json(json!({
        "success": true,
        "roadmap": {
            "targetRole": body["targetRole"],
            "weeks": [{"id": "w1", "number": 1, "tasks": [{"id": "w1t1", "title": "Two Sum"}]}],
        }
    }))
    .into_response()
}

/// One week per requested week, shaped like the planner's output.
async fn generate_comprehensive(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut backend = state.lock().unwrap();
    if backend.comprehensive_missing {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response();
    }
    backend
        .generate_requests
        .push(("generate-comprehensive".to_string(), body.clone()));

    let weeks: Vec<Value> = (1..=body["weeks"].as_u64().unwrap_or_default())
        .map(|n| json!({"id": format!("w{n}"), "number": n, "tasks": []}))
        .collect();
    Json(json!({
        "success": true,
        "roadmap": {
            "overview": {"totalWeeks": body["weeks"], "hoursPerDay": body["hoursPerDay"]},
            "targetRole": body["targetRole"],
            "weeks": weeks,
        }
    }))
    .into_response()
}
