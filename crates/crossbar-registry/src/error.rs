//! Failure types for registration and method execution.

use std::collections::HashMap;

use thiserror::Error;

/// Setup-time registration failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The method name was empty or could not be derived from the handler.
    #[error("invalid method name: {0}")]
    InvalidName(String),
}

/// A business-logic failure carrying a stable label plus parameters.
///
/// The label is looked up in the renderer registry to produce the
/// caller-facing message; the parameters feed the renderer. Neither is
/// ever sent to the caller directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledError {
    /// Stable label identifying the failure class.
    pub label: String,
    /// Renderer inputs.
    pub params: HashMap<String, String>,
    /// HTTP-style status the response should carry.
    pub status: u16,
}

impl LabeledError {
    /// Creates a labeled failure with no parameters.
    pub fn new(label: impl Into<String>, status: u16) -> Self {
        Self {
            label: label.into(),
            params: HashMap::new(),
            status,
        }
    }

    /// Adds a renderer parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// How a method invocation can fail.
///
/// The two variants are the whole classification: the dispatcher pattern
/// matches on this, with no subtype inspection and no fallthrough.
#[derive(Debug, Error)]
pub enum MethodError {
    /// Structured failure, rendered through the label's registered renderer.
    #[error("labeled failure: {}", .0.label)]
    Labeled(LabeledError),
    /// Anything else; logged in full server-side, never echoed to the caller.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<LabeledError> for MethodError {
    fn from(err: LabeledError) -> Self {
        Self::Labeled(err)
    }
}
