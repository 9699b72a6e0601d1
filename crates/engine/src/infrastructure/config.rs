//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP bind host
    pub server_host: String,
    /// HTTP bind port
    pub server_port: u16,
    /// CORS allowed origins (empty disables CORS, "*" allows any)
    pub cors_allowed_origins: Vec<String>,
    /// World state configuration
    pub world_state: WorldStateConfig,
}

/// World state storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldStateConfig {
    pub backend: WorldStateBackend,
    /// SQLite database path (if using sqlite backend)
    pub sqlite_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldStateBackend {
    Memory,
    Sqlite,
}

impl FromStr for WorldStateBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => bail!("Unknown world state backend: {other} (expected memory or sqlite)"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// or `None` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let server_port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(port) => port
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            None => 3000,
        };

        let backend = match lookup("WORLD_STATE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => WorldStateBackend::Sqlite,
        };

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            world_state: WorldStateConfig {
                backend,
                sqlite_path: lookup("WORLD_STATE_DB")
                    .unwrap_or_else(|| "./data/world_state.db".to_string()),
            },
        })
    }

    /// `host:port` string for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
