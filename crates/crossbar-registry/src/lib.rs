//! # crossbar-registry
//!
//! The handler contract and the method registry: how RPC methods are
//! declared, how they fail, and how the dispatcher finds them by name.

pub mod error;
pub mod handler;
pub mod registry;

pub use error::{LabeledError, MethodError, RegistryError};
pub use handler::{handler_fn, Handler};
pub use registry::MethodRegistry;
