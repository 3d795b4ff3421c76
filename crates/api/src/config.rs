//! Application configuration loaded from environment variables.

use std::time::Duration;

use catalog_view::DEFAULT_CHANNEL_CAPACITY;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `VIEW_CHANNEL_CAPACITY`: snapshot broadcast buffer (default: `64`)
/// - `CATALOG_SEED`: seed the demo catalog at start-up (default: `true`)
/// - `VIEW_SETTLE_MS`: how long view routes wait for the first snapshot
///   of a new query (default: `500`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub channel_capacity: usize,
    pub seed_demo: bool,
    pub settle_timeout: Duration,
}

const DEFAULT_SETTLE_MS: u64 = 500;

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            channel_capacity: std::env::var("VIEW_CHANNEL_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .filter(|c| *c > 0)
                .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            seed_demo: std::env::var("CATALOG_SEED")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(true),
            settle_timeout: Duration::from_millis(
                std::env::var("VIEW_SETTLE_MS")
                    .ok()
                    .and_then(|ms| ms.parse().ok())
                    .unwrap_or(DEFAULT_SETTLE_MS),
            ),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            seed_demo: true,
            settle_timeout: Duration::from_millis(DEFAULT_SETTLE_MS),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
