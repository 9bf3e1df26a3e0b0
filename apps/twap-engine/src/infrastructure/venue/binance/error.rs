//! Binance-specific error types.

use thiserror::Error;

use crate::application::ports::VenueError;

/// Errors from the Binance adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinanceError {
    /// API key or secret is missing.
    #[error("Binance API credentials are missing")]
    MissingCredentials,

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Connection could not be established; the request was never sent.
    #[error("Connection error: {0}")]
    Connect(String),

    /// The request was sent but no complete response arrived.
    #[error("Transport error after send: {0}")]
    Transport(String),

    /// API rejected the request.
    #[error("API error {code} (HTTP {status}): {msg}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Binance error code.
        code: i64,
        /// Binance error message.
        msg: String,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limited or IP banned.
    #[error("Rate limited (HTTP {status})")]
    RateLimited {
        /// HTTP status (429 or 418).
        status: u16,
        /// Suggested retry delay in seconds.
        retry_after_secs: Option<u64>,
    },

    /// Server-side failure; execution status unknown.
    #[error("Server error (HTTP {status}): {message}")]
    Server {
        /// HTTP status.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Request signing failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Last error seen.
        last_error: String,
    },
}

impl From<BinanceError> for VenueError {
    fn from(err: BinanceError) -> Self {
        match err {
            BinanceError::Api { code, msg, .. } => Self::Rejected { code, reason: msg },
            BinanceError::AuthenticationFailed(message) => Self::AuthenticationFailed { message },
            BinanceError::MissingCredentials => Self::AuthenticationFailed {
                message: "API credentials are missing".to_string(),
            },
            BinanceError::RateLimited { .. } => Self::RateLimited,
            BinanceError::Connect(message) | BinanceError::Http(message) => {
                Self::Connection { message }
            }
            BinanceError::MaxRetriesExceeded { .. } => Self::Connection {
                message: err.to_string(),
            },
            BinanceError::Transport(message) => Self::UnknownStatus { message },
            BinanceError::Server { .. } => Self::UnknownStatus {
                message: err.to_string(),
            },
            BinanceError::JsonParse(message) | BinanceError::Signing(message) => {
                Self::InvalidResponse { message }
            }
        }
    }
}
