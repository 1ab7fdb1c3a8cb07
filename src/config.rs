//! Server configuration from the environment.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `BITTE_CONFIG` — JSON object; its `url` is published as the server URL in
//!   the plugin manifest
//! - `RUST_LOG` — Tracing filter (read by the binaries, not here)

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

/// Errors raised while reading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` is not a valid port number.
    #[error("Invalid PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// `BITTE_CONFIG` is not a JSON object with a `url` string.
    #[error("Invalid BITTE_CONFIG: {0}")]
    InvalidBitteConfig(#[from] serde_json::Error),
}

/// Deployment settings injected by the assistant platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BitteConfig {
    /// Public URL the service is reachable at.
    pub url: String,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub port: u16,
    pub bitte: Option<BitteConfig>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bitte: None,
        }
    }
}

impl AgentConfig {
    /// Read `PORT` and `BITTE_CONFIG` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT").ok();
        let bitte = env::var("BITTE_CONFIG").ok();
        Self::from_vars(port.as_deref(), bitte.as_deref())
    }

    /// Build a configuration from raw variable values.
    ///
    /// Blank values are treated as unset.
    pub fn from_vars(port: Option<&str>, bitte: Option<&str>) -> Result<Self, ConfigError> {
        let port = match port.map(str::trim).filter(|p| !p.is_empty()) {
            Some(value) => value.parse().map_err(|source| ConfigError::InvalidPort {
                value: value.to_string(),
                source,
            })?,
            None => DEFAULT_PORT,
        };

        let bitte = match bitte.map(str::trim).filter(|b| !b.is_empty()) {
            Some(raw) => Some(serde_json::from_str(raw)?),
            None => None,
        };

        Ok(Self { port, bitte })
    }

    /// Address to listen on: all interfaces, configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Server URL advertised in the manifest.
    ///
    /// Falls back to `http://localhost:{port}` without `BITTE_CONFIG`.
    pub fn server_url(&self) -> String {
        match &self.bitte {
            Some(bitte) => bitte.url.clone(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}
