//! Integration tests for the HTTP router (handle_call, handle_discover).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use http::Request;
use serde_json::{json, Value};
use tower::ServiceExt;

use crossbar_auth::{AuthContext, AuthDecision, AuthGate, RequestMeta};
use crossbar_dispatch::{Dispatcher, ErrorRenderers};
use crossbar_registry::{handler_fn, LabeledError, MethodError, MethodRegistry};
use crossbar_transport_http::{build_router, AppState};

/// Gate that grants only when a `session` cookie is present, exposing the
/// session value as a claim.
struct SessionGate;

#[async_trait]
impl AuthGate for SessionGate {
    async fn authorize(&self, request: &RequestMeta) -> AuthDecision {
        match request.cookie("session") {
            Some(session) => {
                let mut ctx = AuthContext::new();
                ctx.insert("session", session);
                AuthDecision::Granted(ctx)
            }
            None => AuthDecision::Denied,
        }
    }
}

fn make_registry(calls: Arc<AtomicUsize>) -> MethodRegistry {
    let mut registry = MethodRegistry::new();
    registry
        .register(
            "echo",
            handler_fn(1, move |_ctx, args: Vec<Value>| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(args[0].clone())
                }
            }),
        )
        .expect("register");
    registry
        .register(
            "session",
            handler_fn(0, |ctx: AuthContext, _args| async move {
                serde_json::to_value(&ctx).map_err(|e| MethodError::Other(e.into()))
            }),
        )
        .expect("register");
    registry
        .register(
            "reserve",
            handler_fn(1, |_ctx, args: Vec<Value>| async move {
                let item = args[0].as_str().unwrap_or("?").to_string();
                Err(LabeledError::new("out_of_stock", 409)
                    .with_param("item", item)
                    .into())
            }),
        )
        .expect("register");
    registry
}

fn make_state(gate: Option<Arc<dyn AuthGate>>, calls: Arc<AtomicUsize>) -> AppState {
    let registry = make_registry(calls);
    let mut renderers = ErrorRenderers::new();
    renderers.register("out_of_stock", |params| {
        format!("item '{}' is out of stock", params["item"])
    });
    let dispatcher = match gate {
        Some(gate) => Dispatcher::new(registry, gate, renderers),
        None => Dispatcher::with_default_gate(registry, renderers),
    };
    AppState {
        dispatcher: Arc::new(dispatcher),
        api_version: None,
        propagate_status: true,
    }
}

fn default_state() -> AppState {
    make_state(None, Arc::new(AtomicUsize::new(0)))
}

fn post_call(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/rpc/call")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("req")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn health_returns_ok() {
    let app = build_router(default_state(), "/rpc");
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn ready_endpoint_returns_ok() {
    let app = build_router(default_state(), "/rpc");
    let req = Request::builder()
        .uri("/health/ready")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["status"], json!("ready"));
}

#[tokio::test]
async fn malformed_json_is_400_before_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = build_router(make_state(None, calls.clone()), "/rpc");
    let resp = app.oneshot(post_call("not json")).await.expect("resp");
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid JSON"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_call_returns_envelope() {
    let app = build_router(default_state(), "/rpc");
    let resp = app
        .oneshot(post_call(r#"{"method":"echo","params":["ping"]}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!("ping"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn unknown_method_status_is_mirrored() {
    let app = build_router(default_state(), "/rpc");
    let resp = app
        .oneshot(post_call(r#"{"method":"nope","params":[]}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().expect("error").contains("'nope'"));
}

#[tokio::test]
async fn status_propagation_can_be_disabled() {
    let mut state = default_state();
    state.propagate_status = false;
    let app = build_router(state, "/rpc");
    let resp = app
        .oneshot(post_call(r#"{"method":"nope","params":[]}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn version_mismatch_is_rejected_before_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut state = make_state(None, calls.clone());
    state.api_version = Some(2);
    let app = build_router(state, "/rpc");

    let resp = app
        .oneshot(post_call(r#"{"method":"echo","params":["x"],"version":1}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 400);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().expect("error").contains('2'));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_version_is_rejected_when_checking_enabled() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut state = make_state(None, calls.clone());
    state.api_version = Some(2);
    let app = build_router(state, "/rpc");

    let resp = app
        .oneshot(post_call(r#"{"method":"echo","params":["x"]}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 400);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn matching_version_reaches_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut state = make_state(None, calls.clone());
    state.api_version = Some(2);
    let app = build_router(state, "/rpc");

    let resp = app
        .oneshot(post_call(r#"{"method":"echo","params":["x"],"version":2}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn discover_lists_methods_in_registration_order() {
    let app = build_router(default_state(), "/rpc");
    let req = Request::builder()
        .uri("/rpc/discover")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    assert_eq!(body, json!(["echo", "session", "reserve"]));
}

#[tokio::test]
async fn missing_cookie_is_403_with_cookie_gate() {
    let app = build_router(
        make_state(Some(Arc::new(SessionGate)), Arc::new(AtomicUsize::new(0))),
        "/rpc",
    );
    let resp = app
        .oneshot(post_call(r#"{"method":"echo","params":["x"]}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 403);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("authorization failed"));
}

#[tokio::test]
async fn cookie_claims_flow_through_to_the_handler() {
    let app = build_router(
        make_state(Some(Arc::new(SessionGate)), Arc::new(AtomicUsize::new(0))),
        "/rpc",
    );
    let req = Request::builder()
        .method("POST")
        .uri("/rpc/call")
        .header("content-type", "application/json")
        .header("cookie", "session=s%20id; theme=dark")
        .body(Body::from(r#"{"method":"session"}"#))
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let body = body_json(resp).await;
    // Percent-decoded cookie value surfaces as a claim.
    assert_eq!(body["data"]["claims"]["session"], json!("s id"));
}

#[tokio::test]
async fn labeled_error_renders_through_http() {
    let app = build_router(default_state(), "/rpc");
    let resp = app
        .oneshot(post_call(r#"{"method":"reserve","params":["widget"]}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 409);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("item 'widget' is out of stock"));
}

#[tokio::test]
async fn panicking_handler_yields_generic_500() {
    let mut registry = MethodRegistry::new();
    registry
        .register(
            "boom",
            handler_fn(0, |_ctx, _args| async { panic!("handler defect") }),
        )
        .expect("register");
    let state = AppState {
        dispatcher: Arc::new(Dispatcher::with_default_gate(registry, ErrorRenderers::new())),
        api_version: None,
        propagate_status: true,
    };
    let app = build_router(state, "/rpc");

    let resp = app
        .oneshot(post_call(r#"{"method":"boom"}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 500);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("operation failed"));
    assert!(!body["error"].as_str().expect("error").contains("defect"));
}

#[tokio::test]
async fn rpc_routes_respect_the_base_path() {
    let app = build_router(default_state(), "/api/v1");
    let req = Request::builder()
        .uri("/api/v1/discover")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);

    // The old mount point is gone.
    let app = build_router(default_state(), "/api/v1");
    let req = Request::builder()
        .uri("/rpc/discover")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 404);
}
