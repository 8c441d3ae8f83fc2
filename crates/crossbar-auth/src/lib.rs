//! # crossbar-auth
//!
//! Authorization primitives for the RPC dispatch layer: cookie header
//! parsing, the per-call claims context, and the pluggable gate that runs
//! before every dispatch.

pub mod context;
pub mod cookie;
pub mod gate;

pub use context::{AuthContext, ClaimValue};
pub use cookie::parse_cookie_header;
pub use gate::{AllowAll, AuthDecision, AuthGate, RequestMeta};
