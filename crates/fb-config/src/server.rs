//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// 10 MiB, enough for a full bulk update request.
const fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

const fn default_max_bulk_items() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by the CORS layer. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum accepted request body size.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// Maximum number of entries in one bulk status update.
    #[serde(default = "default_max_bulk_items")]
    pub max_bulk_items: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            body_limit_bytes: default_body_limit(),
            max_bulk_items: default_max_bulk_items(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin is allowed.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
