//! Client configuration.

use std::time::Duration;

use crate::auth::Credentials;
use crate::transport::DEFAULT_TIMEOUT;
use crate::types::BaseUrl;

/// Everything needed to build a [`KotakClient`](crate::KotakClient).
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: BaseUrl,
    pub credentials: Credentials,
    /// Per-request timeout of the default HTTP transport.
    pub timeout: Duration,
}

impl Config {
    /// Configuration against the production API host with a 30 second timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: BaseUrl::default(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new(Credentials::new("u", "p", "a", "c", "s", "1"));
        assert_eq!(config.base_url, BaseUrl::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides() {
        let config = Config::new(Credentials::new("u", "p", "a", "c", "s", "1"))
            .with_base_url(BaseUrl::new("http://localhost:9000").unwrap())
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url.host(), Some("localhost"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
