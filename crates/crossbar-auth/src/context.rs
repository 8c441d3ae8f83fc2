//! Per-call authorization context handed to handlers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single claim value: text or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    /// Textual claim (identity, role, session id).
    Text(String),
    /// Numeric claim (user id, expiry).
    Number(i64),
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Claims the gate derived from the request.
///
/// Produced fresh per call, owned for the call duration, and passed by
/// reference into the handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    claims: HashMap<String, ClaimValue>,
}

impl AuthContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a claim.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ClaimValue>) {
        self.claims.insert(key.into(), value.into());
    }

    /// Looks up a claim by key.
    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.claims.get(key)
    }

    /// Whether the context carries no claims.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
