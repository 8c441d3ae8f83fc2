//! The per-call dispatch pipeline.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crossbar_auth::{AllowAll, AuthDecision, AuthGate, RequestMeta};
use crossbar_protocol::{RpcResponse, GENERIC_FAILURE};
use crossbar_registry::{MethodError, MethodRegistry};

use crate::bind::bind_args;
use crate::render::ErrorRenderers;

/// Orchestrates one RPC call from raw body to response envelope.
///
/// Owns the method registry and the renderer registry for one application
/// instance (several dispatchers can coexist in a process). Every failure
/// is converted into an envelope here; nothing escapes to the transport
/// as an error.
pub struct Dispatcher {
    registry: MethodRegistry,
    gate: Arc<dyn AuthGate>,
    renderers: ErrorRenderers,
}

impl Dispatcher {
    /// Creates a dispatcher with an explicit authorization gate.
    pub fn new(
        registry: MethodRegistry,
        gate: Arc<dyn AuthGate>,
        renderers: ErrorRenderers,
    ) -> Self {
        Self {
            registry,
            gate,
            renderers,
        }
    }

    /// Creates a dispatcher that authorizes every call with an empty context.
    pub fn with_default_gate(registry: MethodRegistry, renderers: ErrorRenderers) -> Self {
        Self::new(registry, Arc::new(AllowAll), renderers)
    }

    /// Registered method names, in registration order (the discovery snapshot).
    pub fn method_names(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Dispatches one call.
    ///
    /// `body` is the parsed request body; `request` carries what the gate
    /// sees of the inbound request. The shape checks run in a fixed order
    /// and short-circuit on the first failure.
    pub async fn dispatch(&self, body: &Value, request: &RequestMeta) -> RpcResponse {
        // 1. Shape validation. A falsy method reports 400 before the
        //    not-a-string check, so `null` never reaches the 404 branch.
        let method = body.get("method").unwrap_or(&Value::Null);
        if is_falsy(method) {
            return RpcResponse::fail(400, "method and params required");
        }
        let Some(method) = method.as_str() else {
            return RpcResponse::fail(404, "RPC function doesn't exist");
        };

        let params = match body.get("params") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => return RpcResponse::fail(400, "params should be a list"),
        };

        // 2. Resolution. Unknown methods report 400, not 404 — kept from
        //    the legacy call path.
        let Some(handler) = self.registry.resolve(method) else {
            return RpcResponse::fail(400, format!("RPC function '{method}' not found"));
        };

        // 3. Authorization.
        let ctx = match self.gate.authorize(request).await {
            AuthDecision::Granted(ctx) => ctx,
            AuthDecision::Denied => return RpcResponse::fail(403, "authorization failed"),
        };

        // 4. Invocation with bound positional arguments.
        debug!(method, supplied = params.len(), "dispatching");
        let args = bind_args(handler.arity(), &params);
        match handler.invoke(&ctx, args).await {
            Ok(value) => RpcResponse::ok(value),
            Err(err) => self.classify(method, err),
        }
    }

    /// Maps a method failure onto the response envelope.
    fn classify(&self, method: &str, err: MethodError) -> RpcResponse {
        match err {
            MethodError::Labeled(labeled) => {
                match self.renderers.render(&labeled.label, &labeled.params) {
                    Some(message) => RpcResponse::fail(labeled.status, message),
                    None => {
                        warn!(method, label = %labeled.label, "no renderer for labeled failure");
                        RpcResponse::fail(500, GENERIC_FAILURE)
                    }
                }
            }
            MethodError::Other(err) => {
                error!(method, error = ?err, "handler failed");
                RpcResponse::fail(500, GENERIC_FAILURE)
            }
        }
    }
}

/// JSON "falsy": `null`, `false`, `0`, or the empty string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
