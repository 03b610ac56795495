//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hosted POS API used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://pos-candy-kush.vercel.app/api";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Customer display configuration
///
/// Durations are stored in milliseconds so the struct can be embedded in a
/// host application's settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// API base URL (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// TCP/TLS connect timeout
    pub connect_timeout_ms: u64,

    /// Per-read timeout while receiving the response
    pub read_timeout_ms: u64,

    /// Bound on sending the request
    pub write_timeout_ms: u64,

    /// Pause between the end of one tick and the start of the next
    pub poll_interval_ms: u64,
}

impl DisplayConfig {
    /// Create a configuration for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout_ms: DEFAULT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Overall deadline for one request: connect, then the slower direction
    pub fn request_timeout(&self) -> Duration {
        self.connect_timeout() + self.read_timeout().max(self.write_timeout())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `GET {base}/cart`
    pub fn cart_url(&self) -> String {
        self.join("cart")
    }

    /// `GET {base}/cart/payment`
    pub fn payment_url(&self) -> String {
        self.join("cart/payment")
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Create the HTTP client for this configuration
    pub fn build_client(&self) -> crate::ClientResult<crate::CartApiClient> {
        crate::CartApiClient::new(self)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
