//! Binance adapter configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment for the Binance futures API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinanceEnvironment {
    /// Futures testnet (no real funds).
    #[default]
    Testnet,
    /// Production futures (real funds).
    Mainnet,
}

impl BinanceEnvironment {
    /// Get the base URL for the futures REST API.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://testnet.binancefuture.com",
            Self::Mainnet => "https://fapi.binance.com",
        }
    }

    /// Check if this environment trades real funds.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Testnet => write!(f, "TESTNET"),
            Self::Mainnet => write!(f, "MAINNET"),
        }
    }
}

/// Configuration for the Binance venue adapter.
#[derive(Clone)]
pub struct BinanceConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading environment.
    pub environment: BinanceEnvironment,
    /// Base URL override (defaults to the environment's URL).
    pub base_url: Option<String>,
    /// Signed request validity window.
    pub recv_window: Duration,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl BinanceConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(api_key: String, api_secret: String, environment: BinanceEnvironment) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            base_url: None,
            recv_window: Duration::from_millis(5000),
            timeout: Duration::from_secs(20),
            retry: RetryConfig::default(),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the signed request validity window.
    #[must_use]
    pub const fn with_recv_window(mut self, recv_window: Duration) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Effective base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

impl fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .field("recv_window", &self.recv_window)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Retry configuration for transport-level failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
    /// Jitter as a fraction of the backoff (0.0 disables jitter).
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn testnet_environment_url() {
        let env = BinanceEnvironment::Testnet;
        assert!(env.base_url().contains("testnet"));
        assert!(!env.is_live());
    }

    #[test]
    fn mainnet_environment_url() {
        let env = BinanceEnvironment::Mainnet;
        assert_eq!(env.base_url(), "https://fapi.binance.com");
        assert!(env.is_live());
    }

    #[test]
    fn environment_default_is_testnet() {
        assert_eq!(BinanceEnvironment::default(), BinanceEnvironment::Testnet);
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", BinanceEnvironment::Testnet), "TESTNET");
        assert_eq!(format!("{}", BinanceEnvironment::Mainnet), "MAINNET");
    }

    #[test]
    fn config_defaults() {
        let config = BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            BinanceEnvironment::Testnet,
        );
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.recv_window, Duration::from_millis(5000));
        assert_eq!(config.base_url(), "https://testnet.binancefuture.com");
    }

    #[test]
    fn config_base_url_override_trims_slash() {
        let config = BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            BinanceEnvironment::Mainnet,
        )
        .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn config_debug_redacts_credentials() {
        let config = BinanceConfig::new(
            "my-api-key".to_string(),
            "my-secret".to_string(),
            BinanceEnvironment::Testnet,
        );
        let debug = format!("{config:?}");
        assert!(!debug.contains("my-api-key"));
        assert!(!debug.contains("my-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn retry_config_default() {
        let retry = RetryConfig::default();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.initial_backoff, Duration::from_millis(200));
        assert_eq!(retry.max_backoff, Duration::from_secs(5));
        assert_eq!(retry.multiplier, 2.0);
        assert_eq!(RetryConfig::none().max_attempts, 1);
    }
}
