//! Configuration schema types.

use serde::{Deserialize, Serialize};

/// Top-level crossbar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossbarConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base path the RPC endpoints are mounted under.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Required client API version; `None` disables the version check.
    #[serde(default)]
    pub api_version: Option<u32>,
    /// Mirror envelope status codes onto HTTP responses.
    #[serde(default = "default_propagate_status")]
    pub propagate_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: default_base_path(),
            api_version: None,
            propagate_status: default_propagate_status(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8095
}
fn default_base_path() -> String {
    "/rpc".to_string()
}
fn default_propagate_status() -> bool {
    true
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug").
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
