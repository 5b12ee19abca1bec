use std::time::Duration;

use super::env::{ConfigError, Env};
use crate::middleware::deadline_guard::MAX_REQUEST_TIMEOUT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown.
    pub grace_period: u64,
    /// Seconds a request may run before the deadline guard answers 408.
    pub request_timeout_period: u64,
}

impl HttpServerConfig {
    pub(crate) fn load(env: &Env<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.string_or("HTTP_SERVER_HOST", "0.0.0.0"),
            port: env.parse_or("HTTP_SERVER_PORT", 8080)?,
            grace_period: env.parse_or("HTTP_SERVER_GRACE_PERIOD", 10)?,
            request_timeout_period: env.bounded_or(
                "HTTP_SERVER_REQUEST_TIMEOUT_PERIOD",
                5,
                MAX_REQUEST_TIMEOUT.as_secs(),
            )?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_period)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period)
    }
}
