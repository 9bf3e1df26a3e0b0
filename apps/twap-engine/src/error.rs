//! Invocation-level errors for the TWAP engine.
//!
//! Every failure that ends an invocation maps to a stable reason string and a
//! process exit code.
//!
//! # Exit Codes
//!
//! | Code | Usage |
//! |------|-------|
//! | 0 | Execution completed, or one-shot order acknowledged |
//! | 1 | Execution failed, venue error, configuration error |
//! | 2 | Request failed validation |
//! | 3 | Execution partially completed (including interrupted runs) |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::VenueError;
use crate::application::use_cases::PlaceOrderError;
use crate::config::ConfigError;
use crate::domain::execution_tactics::ExecutionStatus;
use crate::domain::shared::ValidationError;
use crate::telemetry::LoggingError;

/// Exit code for a successful invocation.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for failures other than validation or partial completion.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for validation errors.
pub const EXIT_INVALID_REQUEST: u8 = 2;
/// Exit code for partially completed executions.
pub const EXIT_PARTIAL: u8 = 3;

/// Error codes for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request failed validation.
    InvalidRequest,
    /// Configuration could not be loaded or is incomplete.
    InvalidConfig,
    /// Logging could not be initialized.
    LoggingUnavailable,

    // Venue errors
    /// Venue refused the order.
    OrderRejected,
    /// Rate limited by the venue.
    RateLimited,
    /// Credentials refused.
    AuthenticationFailed,
    /// Venue unreachable; the order was not sent.
    VenueUnavailable,
    /// The order may or may not exist on the venue.
    UnknownOrderStatus,
    /// Venue answered with something unreadable.
    InvalidVenueResponse,

    // Execution outcomes
    /// No chunk was placed.
    ExecutionFailed,
    /// Some chunks were placed before the run stopped.
    PartialExecution,
}

impl ErrorCode {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidRequest => EXIT_INVALID_REQUEST,
            Self::PartialExecution => EXIT_PARTIAL,
            Self::InvalidConfig
            | Self::LoggingUnavailable
            | Self::OrderRejected
            | Self::RateLimited
            | Self::AuthenticationFailed
            | Self::VenueUnavailable
            | Self::UnknownOrderStatus
            | Self::InvalidVenueResponse
            | Self::ExecutionFailed => EXIT_FAILURE,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::LoggingUnavailable => "LOGGING_UNAVAILABLE",
            Self::OrderRejected => "ORDER_REJECTED",
            Self::RateLimited => "RATE_LIMITED",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::VenueUnavailable => "VENUE_UNAVAILABLE",
            Self::UnknownOrderStatus => "UNKNOWN_ORDER_STATUS",
            Self::InvalidVenueResponse => "INVALID_VENUE_RESPONSE",
            Self::ExecutionFailed => "EXECUTION_FAILED",
            Self::PartialExecution => "PARTIAL_EXECUTION",
        }
    }

    /// Error code for a terminal execution status, `None` when completed.
    #[must_use]
    pub const fn for_status(status: ExecutionStatus) -> Option<Self> {
        match status {
            ExecutionStatus::Completed => None,
            ExecutionStatus::PartiallyCompleted => Some(Self::PartialExecution),
            ExecutionStatus::Failed => Some(Self::ExecutionFailed),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context for one invocation.
#[derive(Debug, Error)]
pub struct AppError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl AppError {
    /// Create a new error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }

    /// Machine-readable form for JSON output.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            exit_code: self.exit_code(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// Error body printed in JSON output mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Process exit code.
    pub exit_code: u8,
    /// Additional details.
    pub details: BTreeMap<String, String>,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::InvalidRequest, err.to_string()).with_context("field", err.field())
    }
}

impl From<VenueError> for AppError {
    fn from(err: VenueError) -> Self {
        let code = match &err {
            VenueError::Rejected { .. } => ErrorCode::OrderRejected,
            VenueError::RateLimited => ErrorCode::RateLimited,
            VenueError::Connection { .. } => ErrorCode::VenueUnavailable,
            VenueError::AuthenticationFailed { .. } => ErrorCode::AuthenticationFailed,
            VenueError::UnknownStatus { .. } => ErrorCode::UnknownOrderStatus,
            VenueError::InvalidResponse { .. } => ErrorCode::InvalidVenueResponse,
        };
        let error = Self::new(code, err.to_string());
        match err {
            VenueError::Rejected { code, .. } => error.with_context("venue_code", code.to_string()),
            _ => error,
        }
    }
}

impl From<PlaceOrderError> for AppError {
    fn from(err: PlaceOrderError) -> Self {
        match err {
            PlaceOrderError::Validation(e) => e.into(),
            PlaceOrderError::Venue(e) => e.into(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        let error = Self::new(ErrorCode::InvalidConfig, err.to_string());
        match err {
            ConfigError::ReadError { path, .. } => error.with_context("path", path),
            _ => error,
        }
    }
}

impl From<LoggingError> for AppError {
    fn from(err: LoggingError) -> Self {
        Self::new(ErrorCode::LoggingUnavailable, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCode::InvalidRequest.exit_code(), 2);
        assert_eq!(ErrorCode::PartialExecution.exit_code(), 3);
        assert_eq!(ErrorCode::ExecutionFailed.exit_code(), 1);
        assert_eq!(ErrorCode::OrderRejected.exit_code(), 1);
        assert_eq!(ErrorCode::InvalidConfig.exit_code(), 1);
    }

    #[test]
    fn test_for_status() {
        assert_eq!(ErrorCode::for_status(ExecutionStatus::Completed), None);
        assert_eq!(
            ErrorCode::for_status(ExecutionStatus::PartiallyCompleted),
            Some(ErrorCode::PartialExecution)
        );
        assert_eq!(
            ErrorCode::for_status(ExecutionStatus::Failed),
            Some(ErrorCode::ExecutionFailed)
        );
    }

    #[test]
    fn test_from_validation_error() {
        let error = AppError::from(ValidationError::EmptySymbol);

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.context(), &[("field".to_string(), "symbol".to_string())]);
    }

    #[test]
    fn test_from_venue_rejection() {
        let error = AppError::from(VenueError::Rejected {
            code: -2019,
            reason: "Margin is insufficient.".to_string(),
        });

        assert_eq!(error.code(), ErrorCode::OrderRejected);
        assert!(error.message().contains("Margin is insufficient."));
        assert_eq!(error.to_response().details["venue_code"], "-2019");
    }

    #[test]
    fn test_unknown_status_is_distinct() {
        let error = AppError::from(VenueError::UnknownStatus {
            message: "timed out".to_string(),
        });
        assert_eq!(error.code(), ErrorCode::UnknownOrderStatus);
    }

    #[test]
    fn test_from_config_error() {
        let error = AppError::from(ConfigError::MissingCredentials(vec!["BINANCE_API_KEY"]));
        assert_eq!(error.code(), ErrorCode::InvalidConfig);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::new(ErrorCode::InvalidRequest, "Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }

    #[test]
    fn test_response_serializes() {
        let error = AppError::new(ErrorCode::RateLimited, "slow down").with_context("status", "429");
        let json = serde_json::to_value(error.to_response()).unwrap();

        assert_eq!(json["code"], "RATE_LIMITED");
        assert_eq!(json["exit_code"], 1);
        assert_eq!(json["details"]["status"], "429");
    }
}
