//! The method invocation contract.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crossbar_auth::AuthContext;

use crate::error::MethodError;

/// A registered callable implementing one RPC method.
///
/// The dispatcher binds the request's positional parameters into exactly
/// `arity()` slots before invoking, so `args.len() == arity()` always
/// holds: extra parameters are dropped, missing ones arrive as
/// `Value::Null`.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Number of positional parameter slots the method declares.
    fn arity(&self) -> usize;

    /// Self-reported method name, used by name-derived registration.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Runs the method with the authorization context and bound arguments.
    async fn invoke(&self, ctx: &AuthContext, args: Vec<Value>) -> Result<Value, MethodError>;
}

/// Wrapper adapting an async closure to the `Handler` trait.
struct FnHandler<F> {
    arity: usize,
    f: F,
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(AuthContext, Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, MethodError>> + Send + 'static,
{
    fn arity(&self) -> usize {
        self.arity
    }

    async fn invoke(&self, ctx: &AuthContext, args: Vec<Value>) -> Result<Value, MethodError> {
        (self.f)(ctx.clone(), args).await
    }
}

/// Wraps an async closure as a shareable handler declaring `arity`
/// positional parameters.
pub fn handler_fn<F, Fut>(arity: usize, f: F) -> Arc<dyn Handler>
where
    F: Fn(AuthContext, Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, MethodError>> + Send + 'static,
{
    Arc::new(FnHandler { arity, f })
}
