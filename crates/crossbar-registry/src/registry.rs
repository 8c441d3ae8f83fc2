//! Name → handler mapping with registration and enumeration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::handler::Handler;

/// Method table owned by one dispatcher instance.
///
/// Mutated only during host setup, before traffic is accepted; read on
/// every dispatch afterwards. There is no removal operation. Registering
/// a name twice replaces the handler silently and keeps the name's
/// original position in `list()` output, so discovery responses stay
/// stable within a process run.
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn Handler>>,
    order: Vec<String>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, overwriting any previous entry.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidName` when the trimmed name is empty.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidName("empty method name".into()));
        }
        if !self.methods.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.methods.insert(name, handler);
        Ok(())
    }

    /// Registers a handler under its self-reported name.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidName` when the handler reports no name.
    pub fn register_named(&mut self, handler: Arc<dyn Handler>) -> Result<(), RegistryError> {
        let name = handler
            .name()
            .map(str::to_owned)
            .ok_or_else(|| RegistryError::InvalidName("handler reports no name".into()))?;
        self.register(name, handler)
    }

    /// Looks up a handler by method name. Pure; no side effects.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.methods.get(name).cloned()
    }

    /// Registered method names, in registration order, without duplicates.
    pub fn list(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether no methods are registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
