use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::favorites::DEFAULT_FEED_CAPACITY;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Simulated latency of the catalog fetch in milliseconds (default: 300).
    #[serde(default = "default_fetch_latency_ms")]
    pub fetch_latency_ms: u64,
}

impl CatalogConfig {
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }
}

/// Favorites store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Snapshots buffered per feed subscriber before it lags (default: 64).
    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,
    /// Product ids favorited when a session starts.
    #[serde(default)]
    pub initial: Vec<String>,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_fetch_latency_ms() -> u64 {
    300
}

fn default_feed_capacity() -> usize {
    DEFAULT_FEED_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fetch_latency_ms: default_fetch_latency_ms(),
        }
    }
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            feed_capacity: default_feed_capacity(),
            initial: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
