//! Harvester configuration
//!
//! Bind address, upstream listing page and fetch limits, read from the
//! environment with defaults suited to local use.

use jobwatch_core::dto::scrape::UPSTREAM_FETCH_TIMEOUT_SECS;
use std::time::Duration;
use url::Url;

/// Listing page scraped by default
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.workana.com/jobs";

/// Browser-like user agent sent upstream
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Harvester configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API listens on
    pub bind_addr: String,

    /// Listing page URL, without query
    pub upstream_url: Url,

    /// Upper bound for one upstream page load
    pub fetch_timeout: Duration,

    pub user_agent: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Recognized variables (all optional):
    /// - HARVESTER_BIND_ADDR (default: 0.0.0.0:4000)
    /// - HARVESTER_UPSTREAM_URL (default: https://www.workana.com/jobs)
    /// - HARVESTER_FETCH_TIMEOUT (seconds, default: 30)
    /// - HARVESTER_USER_AGENT
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("HARVESTER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4000".to_string());

        let upstream_url = std::env::var("HARVESTER_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_url = Url::parse(&upstream_url)
            .map_err(|e| anyhow::anyhow!("invalid HARVESTER_UPSTREAM_URL '{}': {}", upstream_url, e))?;

        let fetch_timeout = std::env::var("HARVESTER_FETCH_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(UPSTREAM_FETCH_TIMEOUT_SECS));

        let user_agent = std::env::var("HARVESTER_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            bind_addr,
            upstream_url,
            fetch_timeout,
            user_agent,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if !matches!(self.upstream_url.scheme(), "http" | "https") {
            anyhow::bail!("upstream_url must use http or https");
        }

        if self.fetch_timeout.is_zero() {
            anyhow::bail!("fetch_timeout must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            bind_addr: "127.0.0.1:4000".to_string(),
            upstream_url: Url::parse(DEFAULT_UPSTREAM_URL).unwrap(),
            fetch_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_upstream() {
        let mut config = config();
        config.upstream_url = Url::parse("ftp://example.com/jobs").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = config();
        config.fetch_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
