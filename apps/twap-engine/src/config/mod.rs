//! Configuration for the TWAP engine.
//!
//! Optional YAML file with environment variable interpolation. Every section
//! has defaults, so running without a file is valid; credentials then come
//! from `BINANCE_API_KEY` and `BINANCE_API_SECRET`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use twap_engine::config::{Config, load_config};
//!
//! let config = load_config(Path::new("twap.yaml"))?;
//! println!("quantity precision: {}", config.execution.quantity_precision);
//! ```

mod execution;
mod logging;
mod venue;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use execution::ExecutionConfig;
pub use logging::{LogFileConfig, LogFormat, LogRotation, LoggingConfig};
pub use venue::{API_KEY_ENV, API_SECRET_ENV, RetrySettings, VenueConfig};

/// Longest accepted client order prefix; keeps derived IDs within 36 chars.
pub const MAX_CLIENT_ORDER_PREFIX_LEN: usize = 12;
/// Largest accepted decimal precision.
pub const MAX_PRECISION: u32 = 18;
/// Largest signed-request window the venue accepts, in milliseconds.
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Venue credentials are not set.
    #[error("Missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Venue connection.
    #[serde(default)]
    pub venue: VenueConfig,
    /// Dispatch precision and identifiers.
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from `path` if given, otherwise validated defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_config(path),
            None => {
                let config = Self::default();
                validate_config(&config)?;
                Ok(config)
            }
        }
    }

    /// Fail unless both venue credentials are set.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` naming the unset variables.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        let missing = self.venue.missing_credentials();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingCredentials(missing))
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    // an empty document means "all defaults"
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let venue = &config.venue;

    if venue.recv_window_ms == 0 || venue.recv_window_ms > MAX_RECV_WINDOW_MS {
        return Err(ConfigError::ValidationError(format!(
            "venue.recv_window_ms must be between 1 and {MAX_RECV_WINDOW_MS}"
        )));
    }

    if venue.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "venue.timeout_secs must be positive".to_string(),
        ));
    }

    if let Some(url) = &venue.base_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::ValidationError(
            "venue.base_url must start with http:// or https://".to_string(),
        ));
    }

    let retry = &venue.retry;
    if retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "venue.retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if retry.initial_backoff_ms > retry.max_backoff_ms {
        return Err(ConfigError::ValidationError(
            "venue.retry.initial_backoff_ms must not exceed max_backoff_ms".to_string(),
        ));
    }

    if !retry.multiplier.is_finite() || retry.multiplier < 1.0 {
        return Err(ConfigError::ValidationError(
            "venue.retry.multiplier must be at least 1.0".to_string(),
        ));
    }

    let execution = &config.execution;
    if execution.quantity_precision > MAX_PRECISION || execution.price_precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "execution precision must be between 0 and {MAX_PRECISION}"
        )));
    }

    let prefix = &execution.client_order_prefix;
    if prefix.is_empty()
        || prefix.len() > MAX_CLIENT_ORDER_PREFIX_LEN
        || !prefix.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ConfigError::ValidationError(format!(
            "execution.client_order_prefix must be 1 to {MAX_CLIENT_ORDER_PREFIX_LEN} alphanumeric characters"
        )));
    }

    if let Some(file) = &config.logging.file
        && (file.directory.is_empty() || file.file_name.is_empty())
    {
        return Err(ConfigError::ValidationError(
            "logging.file requires a directory and file_name".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::venue::BinanceEnvironment;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.venue.environment, BinanceEnvironment::Testnet);
        assert_eq!(config.venue.recv_window_ms, 5000);
        assert_eq!(config.venue.timeout_secs, 20);
        assert_eq!(config.venue.retry.max_attempts, 3);
        assert_eq!(config.execution.quantity_precision, 8);
        assert_eq!(config.execution.price_precision, 8);
        assert_eq!(config.execution.client_order_prefix, "twap");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.file.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = load_config_from_string("").unwrap();
        assert_eq!(config.execution.client_order_prefix, "twap");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "environment: ${TWAP_CONFIG_TEST_NONEXISTENT_VAR:-MAINNET}";
        assert_eq!(interpolate_env_vars(input), "environment: MAINNET");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "api_key: ${TWAP_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "api_key: ");
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
venue:
  environment: MAINNET
  base_url: "http://127.0.0.1:8080"
  api_key: "key"
  api_secret: "secret"
  recv_window_ms: 10000
  timeout_secs: 5
  retry:
    max_attempts: 5
    initial_backoff_ms: 100
    max_backoff_ms: 2000
    multiplier: 3.0

execution:
  quantity_precision: 3
  price_precision: 1
  client_order_prefix: "desk1"

logging:
  level: "debug"
  format: "json"
  file:
    directory: "/var/log/twap"
    rotation: "hourly"
"#;

        let config = load_config_from_string(yaml).unwrap();

        assert_eq!(config.venue.environment, BinanceEnvironment::Mainnet);
        assert_eq!(config.venue.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.venue.api_key, "key");
        assert_eq!(config.venue.recv_window_ms, 10_000);
        assert_eq!(config.venue.retry.max_attempts, 5);
        assert!((config.venue.retry.multiplier - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.execution.quantity_precision, 3);
        assert_eq!(config.execution.price_precision, 1);
        assert_eq!(config.execution.client_order_prefix, "desk1");
        assert_eq!(config.logging.format, LogFormat::Json);

        let file = config.logging.file.unwrap();
        assert_eq!(file.directory, "/var/log/twap");
        assert_eq!(file.file_name, "twap.log");
        assert_eq!(file.rotation, LogRotation::Hourly);
    }

    #[test]
    fn test_validation_recv_window_out_of_range() {
        let yaml = "venue:\n  recv_window_ms: 70000\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for recv_window_ms");
        };
        assert!(err.to_string().contains("recv_window_ms"));
    }

    #[test]
    fn test_validation_precision_too_large() {
        let yaml = "execution:\n  quantity_precision: 19\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for precision");
        };
        assert!(err.to_string().contains("precision"));
    }

    #[test]
    fn test_validation_bad_prefix() {
        for prefix in ["", "has-dash", "waytoolongprefix"] {
            let yaml = format!("execution:\n  client_order_prefix: \"{prefix}\"\n");
            let Err(err) = load_config_from_string(&yaml) else {
                panic!("expected error for prefix {prefix:?}");
            };
            assert!(err.to_string().contains("client_order_prefix"));
        }
    }

    #[test]
    fn test_validation_backoff_order() {
        let yaml = "venue:\n  retry:\n    initial_backoff_ms: 9000\n    max_backoff_ms: 1000\n";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_invalid_environment_rejected() {
        let yaml = "venue:\n  environment: STAGING\n";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "execution:\n  quantity_precision: 4").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.execution.quantity_precision, 4);
    }

    #[test]
    fn test_load_config_missing_file() {
        let Err(err) = load_config(Path::new("/nonexistent/twap.yaml")) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/twap.yaml"));
    }

    #[test]
    fn test_require_credentials() {
        let mut config = Config::default();
        config.venue.api_key = String::new();
        config.venue.api_secret = "secret".to_string();

        let Err(err) = config.require_credentials() else {
            panic!("expected missing credentials");
        };
        assert_eq!(err.to_string(), "Missing required credentials: BINANCE_API_KEY");

        config.venue.api_key = "key".to_string();
        assert!(config.require_credentials().is_ok());
    }
}
