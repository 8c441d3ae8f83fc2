//! The authorization gate run before every dispatch.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::context::AuthContext;

/// What the gate sees of the inbound request.
///
/// The transport builds one per call from the parsed `Cookie` header; the
/// gate receives the same shape no matter which endpoint the call entered
/// through.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    /// Parsed cookies from the `Cookie` header.
    pub cookies: HashMap<String, String>,
}

impl RequestMeta {
    /// Creates metadata from parsed cookies.
    pub fn from_cookies(cookies: HashMap<String, String>) -> Self {
        Self { cookies }
    }

    /// Returns a cookie value by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    /// The call may proceed; the context is handed to the handler.
    Granted(AuthContext),
    /// The call is rejected before the handler runs.
    Denied,
}

/// Pluggable authorization predicate, supplied by the host application.
///
/// Runs once per call, before the handler. Implementations may perform
/// I/O (token verification) and suspend; they must not touch the method
/// or renderer registries.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Decides whether the call may proceed.
    async fn authorize(&self, request: &RequestMeta) -> AuthDecision;
}

/// Default gate: authorizes every call with an empty context.
pub struct AllowAll;

#[async_trait]
impl AuthGate for AllowAll {
    async fn authorize(&self, _request: &RequestMeta) -> AuthDecision {
        AuthDecision::Granted(AuthContext::default())
    }
}
