//! Label → renderer registry for labeled failures.

use std::collections::HashMap;

type RenderFn = Box<dyn Fn(&HashMap<String, String>) -> String + Send + Sync>;

/// Renderer table owned by one dispatcher instance.
///
/// Populated at setup, consulted only when classifying labeled failures.
/// Renderers are synchronous formatting functions from error parameters
/// to a caller-facing message; they must be side-effect-free.
#[derive(Default)]
pub struct ErrorRenderers {
    renderers: HashMap<String, RenderFn>,
}

impl ErrorRenderers {
    /// Creates an empty renderer table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a renderer for `label`, overwriting any prior one.
    pub fn register<F>(&mut self, label: impl Into<String>, renderer: F)
    where
        F: Fn(&HashMap<String, String>) -> String + Send + Sync + 'static,
    {
        self.renderers.insert(label.into(), Box::new(renderer));
    }

    /// Renders `label` with `params`; `None` when no renderer is registered.
    pub fn render(&self, label: &str, params: &HashMap<String, String>) -> Option<String> {
        self.renderers.get(label).map(|renderer| renderer(params))
    }
}
