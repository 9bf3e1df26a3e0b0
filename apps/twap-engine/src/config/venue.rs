//! Venue configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::venue::{BinanceConfig, BinanceEnvironment, RetryConfig};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// Venue connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Target environment.
    #[serde(default)]
    pub environment: BinanceEnvironment,
    /// Base URL override (mock servers, proxies).
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key. Falls back to `BINANCE_API_KEY`.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// API secret. Falls back to `BINANCE_API_SECRET`.
    #[serde(default = "default_api_secret")]
    pub api_secret: String,
    /// Signed request validity window in milliseconds.
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Transport retry settings.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            environment: BinanceEnvironment::default(),
            base_url: None,
            api_key: default_api_key(),
            api_secret: default_api_secret(),
            recv_window_ms: default_recv_window_ms(),
            timeout_secs: default_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl std::fmt::Debug for VenueConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VenueConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("recv_window_ms", &self.recv_window_ms)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl VenueConfig {
    /// Names of the credential variables that are unset.
    #[must_use]
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push(API_KEY_ENV);
        }
        if self.api_secret.is_empty() {
            missing.push(API_SECRET_ENV);
        }
        missing
    }

    /// Build the adapter configuration.
    #[must_use]
    pub fn to_binance_config(&self) -> BinanceConfig {
        let mut config = BinanceConfig::new(
            self.api_key.clone(),
            self.api_secret.clone(),
            self.environment,
        )
        .with_recv_window(Duration::from_millis(self.recv_window_ms))
        .with_timeout(Duration::from_secs(self.timeout_secs))
        .with_retry(self.retry.to_retry_config());
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        config
    }
}

/// Transport retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Attempts including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// First backoff in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Backoff cap in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff growth factor.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
        }
    }
}

impl RetrySettings {
    /// Convert to the adapter's retry configuration.
    #[must_use]
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            multiplier: self.multiplier,
            ..RetryConfig::default()
        }
    }
}

fn default_api_key() -> String {
    std::env::var(API_KEY_ENV).unwrap_or_default()
}

fn default_api_secret() -> String {
    std::env::var(API_SECRET_ENV).unwrap_or_default()
}

const fn default_recv_window_ms() -> u64 {
    5000
}

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

const fn default_max_backoff_ms() -> u64 {
    5000
}

const fn default_multiplier() -> f64 {
    2.0
}
