//! Runnable host application: registers a few methods and a cookie-based
//! gate, then serves the RPC endpoints over HTTP.
//!
//! ```sh
//! cargo run -p crossbar-transport-http --example serve
//! curl -s localhost:8095/rpc/discover
//! curl -s -X POST localhost:8095/rpc/call \
//!     -H 'content-type: application/json' -H 'cookie: session=dev' \
//!     -d '{"method":"sum","params":[1,2]}'
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crossbar_auth::{AuthContext, AuthDecision, AuthGate, RequestMeta};
use crossbar_config::load_config;
use crossbar_dispatch::{Dispatcher, ErrorRenderers};
use crossbar_registry::{handler_fn, LabeledError, MethodError, MethodRegistry};
use crossbar_transport_http::HttpServer;

/// Grants access when a `session` cookie is present, recording it as a claim.
struct SessionCookieGate;

#[async_trait]
impl AuthGate for SessionCookieGate {
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(None)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    let mut registry = MethodRegistry::new();
    registry.register(
        "echo",
        handler_fn(1, |_ctx, args: Vec<Value>| async move { Ok(args[0].clone()) }),
    )?;
    registry.register(
        "sum",
        handler_fn(2, |_ctx, args: Vec<Value>| async move {
            let a = args[0].as_i64().unwrap_or(0);
            let b = args[1].as_i64().unwrap_or(0);
            Ok(json!(a + b))
        }),
    )?;
    registry.register(
        "whoami",
        handler_fn(0, |ctx: AuthContext, _args| async move {
            serde_json::to_value(&ctx).map_err(|e| MethodError::Other(e.into()))
        }),
    )?;
    registry.register(
        "reserve",
        handler_fn(1, |_ctx, args: Vec<Value>| async move {
            let item = args[0].as_str().unwrap_or("unknown").to_string();
            Err(LabeledError::new("out_of_stock", 409)
                .with_param("item", item)
                .into())
        }),
    )?;

    let mut renderers = ErrorRenderers::new();
    renderers.register("out_of_stock", |params| {
        format!(
            "item '{}' is out of stock",
            params.get("item").map(String::as_str).unwrap_or("?")
        )
    });

    let dispatcher = Arc::new(Dispatcher::new(
        registry,
        Arc::new(SessionCookieGate),
        renderers,
    ));

    let server = HttpServer::new(dispatcher, &config.server)?;
    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
