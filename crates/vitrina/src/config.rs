//! Suite configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default bound for element waits (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default bound for navigation settle (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval for element waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default target site
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

/// Configuration for a test suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the target site
    pub base_url: String,
    /// Bound for element waits, in milliseconds
    pub wait_timeout_ms: u64,
    /// Bound for navigation settle, in milliseconds
    pub navigation_timeout_ms: u64,
    /// Polling interval for element waits, in milliseconds
    pub poll_interval_ms: u64,
    /// Directory for failure snapshots
    pub snapshot_dir: PathBuf,
    /// Whether to capture failure snapshots at all
    pub capture_snapshots: bool,
    /// Run the browser headless
    pub headless: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            snapshot_dir: PathBuf::from("test-results/screenshots"),
            capture_snapshots: true,
            headless: true,
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from defaults plus environment overrides.
    ///
    /// Recognized variables: `VITRINA_BASE_URL`, `VITRINA_TIMEOUT_MS`,
    /// `VITRINA_SNAPSHOT_DIR`, `VITRINA_HEADLESS`. Unparsable values fall
    /// back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("VITRINA_BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(ms) = std::env::var("VITRINA_TIMEOUT_MS") {
            if let Ok(ms) = ms.trim().parse::<u64>() {
                config.wait_timeout_ms = ms;
            }
        }
        if let Ok(dir) = std::env::var("VITRINA_SNAPSHOT_DIR") {
            if !dir.trim().is_empty() {
                config.snapshot_dir = PathBuf::from(dir);
            }
        }
        if let Ok(headless) = std::env::var("VITRINA_HEADLESS") {
            config.headless = !matches!(headless.trim(), "0" | "false" | "no");
        }

        config
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the element wait bound
    #[must_use]
    pub const fn with_wait_timeout(mut self, ms: u64) -> Self {
        self.wait_timeout_ms = ms;
        self
    }

    /// Set the navigation settle bound
    #[must_use]
    pub const fn with_navigation_timeout(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    /// Set the wait polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the snapshot directory
    #[must_use]
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    /// Enable or disable failure snapshots
    #[must_use]
    pub const fn with_snapshots(mut self, enabled: bool) -> Self {
        self.capture_snapshots = enabled;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Element wait bound as a Duration
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// Navigation settle bound as a Duration
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Wait polling interval as a Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Resolve a route against the base URL
    #[must_use]
    pub fn url_for(&self, route: &str) -> String {
        if route.is_empty() || route == "/" {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{}", self.base_url, route.trim_start_matches('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.wait_timeout_ms, 10_000);
        assert_eq!(config.poll_interval_ms, 50);
        assert!(config.headless);
        assert!(config.capture_snapshots);
    }

    #[test]
    fn test_builder() {
        let config = SuiteConfig::new()
            .with_base_url("http://localhost:3000/")
            .with_wait_timeout(2_000)
            .with_poll_interval(10)
            .with_snapshots(false)
            .with_headless(false);

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.wait_timeout(), Duration::from_millis(2_000));
        assert_eq!(config.poll_interval(), Duration::from_millis(10));
        assert!(!config.capture_snapshots);
        assert!(!config.headless);
    }

    #[test]
    fn test_url_for_routes() {
        let config = SuiteConfig::new().with_base_url("https://www.saucedemo.com");
        assert_eq!(config.url_for("/"), "https://www.saucedemo.com/");
        assert_eq!(
            config.url_for("/inventory.html"),
            "https://www.saucedemo.com/inventory.html"
        );
        assert_eq!(
            config.url_for("cart.html"),
            "https://www.saucedemo.com/cart.html"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SuiteConfig::new().with_wait_timeout(5_000);
        let json = serde_json::to_string(&config).unwrap();
        let back: SuiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wait_timeout_ms, 5_000);
    }
}
