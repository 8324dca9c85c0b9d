use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShopError};

/// Default number of owner ids per `IN (...)` batch when fetching collections
pub const DEFAULT_BATCH_FETCH_SIZE: usize = 100;

/// Runtime configuration for the jpashop server and CLI
///
/// Sources, lowest precedence first: built-in defaults, the TOML file,
/// environment variables (`DATABASE_URL`, `JPASHOP_BIND`). The CLI applies
/// its own flags on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// sqlx connection string, e.g. `sqlite://jpashop.db`
    pub database_url: String,
    /// Pool size
    pub max_connections: u32,
    /// Ids per batch when loading order items for a page of orders
    pub default_batch_fetch_size: usize,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_url: "sqlite://jpashop.db".to_string(),
            max_connections: 5,
            default_batch_fetch_size: DEFAULT_BATCH_FETCH_SIZE,
            cors_permissive: false,
        }
    }
}

impl ShopConfig {
    /// Load config from `$JPASHOP_CONFIG` or ~/.jpashop/config.toml.
    ///
    /// A missing file is not an error: defaults are used and environment
    /// overrides still apply.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a config file without applying environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ShopError::config(path, format!("failed to read: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ShopError::config(path, format!("invalid TOML: {}", e)))?;

        if config.default_batch_fetch_size == 0 {
            return Err(ShopError::config(
                path,
                "default_batch_fetch_size must be at least 1",
            ));
        }

        Ok(config)
    }

    /// Get config file path: `$JPASHOP_CONFIG` or ~/.jpashop/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("JPASHOP_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jpashop/config.toml")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database_url = url;
            }
        }

        if let Ok(bind) = env::var("JPASHOP_BIND") {
            self.bind_addr = bind.parse().map_err(|_| {
                ShopError::config("JPASHOP_BIND", format!("invalid socket address '{}'", bind))
            })?;
        }

        Ok(())
    }
}
