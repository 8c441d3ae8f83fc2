//! # crossbar-protocol
//!
//! Wire types for the crossbar RPC layer.
//! This crate defines the response envelope every endpoint returns and the
//! generic failure text shown to callers when detail must stay server-side.

pub mod envelope;

pub use envelope::{RpcResponse, GENERIC_FAILURE};
