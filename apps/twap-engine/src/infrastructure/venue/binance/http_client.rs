//! Signed HTTP client with transport-level retry.
//!
//! Orders are not idempotent on the venue side, so only failures where the
//! request provably never reached the matching engine are retried: connect
//! errors and HTTP 429. Timeouts and 5xx responses surface as-is.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::api_types::BinanceErrorResponse;
use super::config::{BinanceConfig, RetryConfig};
use super::error::BinanceError;
use super::signer::RequestSigner;

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client for the Binance futures API.
#[derive(Debug, Clone)]
pub struct BinanceHttpClient {
    client: Client,
    api_key: String,
    signer: RequestSigner,
    base_url: String,
    recv_window_ms: u128,
    retry_config: RetryConfig,
}

impl BinanceHttpClient {
    /// Create a new HTTP client from config.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if the key or secret is empty, or `Http`
    /// if the client cannot be built.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(BinanceError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinanceError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            signer: RequestSigner::new(config.api_secret.clone()),
            base_url: config.base_url().to_string(),
            recv_window_ms: config.recv_window.as_millis(),
            retry_config: config.retry.clone(),
        })
    }

    /// Send a signed POST with the given parameters in the query string.
    ///
    /// `timestamp`, `recvWindow` and `signature` are appended per attempt.
    pub async fn signed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, BinanceError> {
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            let query = self.signed_query(params)?;
            let url = format!("{}{path}?{query}", self.base_url);

            let response = match self
                .client
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) if e.is_connect() => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Connection failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    if backoff.attempt <= 1 {
                        return Err(BinanceError::Connect(e.to_string()));
                    }
                    return Err(BinanceError::MaxRetriesExceeded {
                        attempts: backoff.attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => return Err(BinanceError::Transport(e.to_string())),
            };

            let status = response.status();

            if status.is_success() {
                let text = response
                    .text()
                    .await
                    .map_err(|e| BinanceError::Transport(e.to_string()))?;
                return serde_json::from_str(&text)
                    .map_err(|e| BinanceError::JsonParse(e.to_string()));
            }

            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();
            let (code, msg) = match serde_json::from_str::<BinanceErrorResponse>(&error_body) {
                Ok(err) => (err.code, err.msg),
                Err(_) => (-i64::from(status.as_u16()), error_body),
            };

            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    if let Some(delay) = backoff.next_backoff() {
                        let delay = retry_after.map_or(delay, Duration::from_secs);
                        tracing::warn!(
                            code,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Rate limited, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(BinanceError::RateLimited {
                        status: status.as_u16(),
                        retry_after_secs: retry_after,
                    });
                }
                ErrorCategory::Banned => {
                    return Err(BinanceError::RateLimited {
                        status: status.as_u16(),
                        retry_after_secs: retry_after,
                    });
                }
                ErrorCategory::Auth => return Err(BinanceError::AuthenticationFailed(msg)),
                ErrorCategory::Rejected => {
                    return Err(BinanceError::Api {
                        status: status.as_u16(),
                        code,
                        msg,
                    });
                }
                ErrorCategory::Server => {
                    return Err(BinanceError::Server {
                        status: status.as_u16(),
                        message: msg,
                    });
                }
            }
        }
    }

    fn signed_query(&self, params: &[(&str, String)]) -> Result<String, BinanceError> {
        let mut query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!(
            "recvWindow={}&timestamp={}",
            self.recv_window_ms,
            Utc::now().timestamp_millis()
        ));
        let signature = self.signer.sign(&query)?;
        query.push_str("&signature=");
        query.push_str(&signature);
        Ok(query)
    }
}

/// Error category for determining retry behavior.
#[derive(Debug, PartialEq, Eq)]
enum ErrorCategory {
    RateLimited,
    Banned,
    Auth,
    Rejected,
    Server,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        418 => ErrorCategory::Banned,
        401 | 403 => ErrorCategory::Auth,
        500..=599 => ErrorCategory::Server,
        _ => ErrorCategory::Rejected,
    }
}

/// Exponential backoff calculator with proportional jitter.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 1,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
            jitter_factor: config.jitter_factor,
        }
    }

    /// Delay before the next attempt, or `None` once attempts are exhausted.
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_attempts {
            return None;
        }
        self.attempt += 1;

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(self.apply_jitter(backoff))
    }

    fn apply_jitter(&self, backoff: Duration) -> Duration {
        if self.jitter_factor <= 0.0 {
            return backoff;
        }
        let base = backoff.as_secs_f64();
        let range = base * self.jitter_factor;
        let jittered = rand::rng().random_range((base - range).max(0.0)..=base + range);
        Duration::from_secs_f64(jittered)
    }
}
