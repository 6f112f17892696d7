//! Client configuration

use crate::DEFAULT_ENDPOINT;
use std::time::Duration;

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Service endpoint URL
    pub endpoint: String,
    /// Optional request timeout. `None` leaves every request unbounded;
    /// callers relying on bounded latency wrap the whole operation in
    /// their own deadline.
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            user_agent: format!("shdw-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new config with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.endpoint
    }
}
