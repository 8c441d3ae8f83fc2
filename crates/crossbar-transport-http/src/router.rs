//! Axum router for the RPC dispatch endpoints.
//! Routes: `POST {base}/call` (dispatch), `GET {base}/discover` (method
//! listing), `GET /health` (liveness), `GET /health/ready` (readiness).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;

use crossbar_auth::{parse_cookie_header, RequestMeta};
use crossbar_dispatch::Dispatcher;
use crossbar_protocol::GENERIC_FAILURE;

/// Shared state threaded through the RPC handlers.
#[derive(Clone)]
pub struct AppState {
    /// The call dispatcher.
    pub dispatcher: Arc<Dispatcher>,
    /// Required client API version (None = no version check).
    pub api_version: Option<u32>,
    /// Mirror envelope status codes onto HTTP responses; when off, every
    /// dispatched call answers HTTP 200 with the outcome in the body.
    pub propagate_status: bool,
}

/// Builds the axum `Router`, mounting the RPC endpoints under `base_path`.
///
/// `base_path` must start with `/` and name at least one segment
/// (`HttpServer::new` validates this for callers going through it).
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let rpc = Router::new()
        .route("/call", post(handle_call))
        .route("/discover", get(handle_discover))
        .with_state(state);

    Router::new()
        .nest(base_path, rpc)
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "crossbar"}))
}

/// Readiness probe — returns `200 OK` once the server is accepting requests.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "crossbar"}))
}

async fn handle_call(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let body: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid JSON"})),
            )
                .into_response();
        }
    };

    // Version precheck runs before the dispatcher; a missing version field
    // counts as a mismatch.
    if let Some(required) = state.api_version {
        let client = body.get("version").and_then(Value::as_u64);
        if client != Some(u64::from(required)) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!(
                        "unsupported API version; minimum supported client version is {required}"
                    )
                })),
            )
                .into_response();
        }
    }

    let cookies =
        parse_cookie_header(headers.get(header::COOKIE).and_then(|v| v.to_str().ok()));
    let request = RequestMeta::from_cookies(cookies);

    let response = state.dispatcher.dispatch(&body, &request).await;
    let status = if state.propagate_status {
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        StatusCode::OK
    };
    (status, Json(response)).into_response()
}

async fn handle_discover(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dispatcher.method_names())
}

/// Outermost guard: a panic anywhere below yields a generic 500 body.
fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": GENERIC_FAILURE})),
    )
        .into_response()
}
