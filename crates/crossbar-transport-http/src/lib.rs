//! # crossbar-transport-http
//!
//! HTTP transport adapter for the crossbar dispatch layer.
//! Exposes `POST {base}/call` and `GET {base}/discover` over axum, with
//! cookie propagation to the authorization gate and optional API-version
//! checking.

mod error;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
