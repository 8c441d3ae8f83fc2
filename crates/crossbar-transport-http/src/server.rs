//! HTTP server that binds the RPC router to a TCP socket.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crossbar_config::ServerConfig;
use crossbar_dispatch::Dispatcher;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the RPC dispatch layer.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) base_path: String,
    pub(crate) state: AppState,
}

impl fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpServer")
            .field("addr", &self.addr)
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

impl HttpServer {
    /// Creates a new HTTP server from host settings.
    ///
    /// # Errors
    ///
    /// Returns `HttpTransportError::Config` when the host address does not
    /// parse or the base path does not start with `/` and name a segment.
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        config: &ServerConfig,
    ) -> Result<Self, HttpTransportError> {
        let ip: IpAddr = config.host.parse().map_err(|_| HttpTransportError::Config {
            message: format!("invalid host address: {}", config.host),
        })?;
        if !config.base_path.starts_with('/') || config.base_path.len() < 2 {
            return Err(HttpTransportError::Config {
                message: format!(
                    "base path must start with '/' and name a segment: {:?}",
                    config.base_path
                ),
            });
        }

        Ok(Self {
            addr: SocketAddr::new(ip, config.port),
            base_path: config.base_path.clone(),
            state: AppState {
                dispatcher,
                api_version: config.api_version,
                propagate_status: config.propagate_status,
            },
        })
    }

    /// The address the server will bind.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        let listener =
            TcpListener::bind(self.addr)
                .await
                .map_err(|e| HttpTransportError::Bind {
                    addr: self.addr.to_string(),
                    source: e,
                })?;

        tracing::info!(addr = %self.addr, base = %self.base_path, "crossbar RPC server ready");

        let router = build_router(self.state, &self.base_path);
        axum::serve(listener, router)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        Ok(())
    }
}
