//! Configuration management for the puzzle checker
//!
//! Loads configuration from YAML files and environment variables.
//! Environment variables override YAML values.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Bybit puzzle share-info endpoint
pub const DEFAULT_SHARE_ENDPOINT: &str = "https://api2.bybit.com/spot/api/puzzle/v1/shareInfo";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote share-info API
    #[serde(default)]
    pub share_api: ShareApiConfig,
    /// Token lookup memoization
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Remote share-info API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ShareApiConfig {
    /// Full URL of the shareInfo endpoint (the `shareId` query is appended)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_share_timeout")]
    pub timeout_ms: u64,
}

impl ShareApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ShareApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_share_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_SHARE_ENDPOINT.to_string()
}

fn default_share_timeout() -> u64 {
    10_000
}

/// Token lookup configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// Maximum number of memoized unique codes
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    128
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/puzzles.db")
}

fn default_max_connections() -> u32 {
    5
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PUZZLE__*)
    /// 2. config/config.yaml (if exists)
    /// 3. config.yaml (if exists)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("share_api.endpoint", DEFAULT_SHARE_ENDPOINT)?
            .set_default("share_api.timeout_ms", 10_000)?
            .set_default("lookup.cache_capacity", 128)?
            .set_default("database.path", "data/puzzles.db")?
            .set_default("database.max_connections", 5)?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config/config").required(false))
            // PUZZLE__SHARE_API__TIMEOUT_MS=2000 -> share_api.timeout_ms = 2000
            .add_source(
                Environment::with_prefix("PUZZLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share_api.endpoint.is_empty() {
            return Err(ConfigError::Message(
                "Share API endpoint must be set".to_string(),
            ));
        }

        if self.share_api.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "Share API timeout must be greater than zero".to_string(),
            ));
        }

        if self.lookup.cache_capacity == 0 {
            return Err(ConfigError::Message(
                "Lookup cache capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
