//! API configuration, resolved once at startup and passed to the client

use std::time::Duration;

/// Current-weather endpoint root used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Units flag sent with every request. Only metric is supported.
pub const UNITS: &str = "metric";

/// Connection settings for the remote weather API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without the `/weather` path, e.g. `https://host/data/2.5`
    pub base_url: String,
    /// API key sent as `appid`. An empty key is passed through as-is and
    /// surfaces as a normal fetch failure.
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the current-weather endpoint
    pub fn weather_url(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, "")
    }
}
