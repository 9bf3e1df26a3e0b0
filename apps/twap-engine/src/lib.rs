// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! TWAP Engine - Rust Core Library
//!
//! Splits a large limit order into equal child orders dispatched at a fixed
//! interval against a trading venue.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (value objects, pure services)
//!   - `order_execution`: Sides, order types, one-shot order requests
//!   - `execution_tactics`: TWAP validation, chunk planning, execution reports
//!   - `shared`: Identifiers, symbols, validation rules
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`OrderVenue`, `Scheduler`, `AuditSink`)
//!   - `use_cases`: `ExecuteTwap`, `PlaceOrder`
//!   - `services`: Report rendering
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `venue`: Binance USD-M futures adapter, simulated venue
//!   - `scheduler`: Tokio timer with cancellation
//!   - `audit`: Tracing-backed audit sink
//!
//! - **Ambient**: `config`, `telemetry`, `error`, `cli`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Ambient Modules
// =============================================================================

/// Command-line interface.
pub mod cli;

/// Configuration loading and validation.
pub mod config;

/// Invocation errors and exit codes.
pub mod error;

/// Logging setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::execution_tactics::{
    ChunkPlan, ChunkPlanner, ChunkSpec, ExecutionReport, ExecutionStatus, MAX_CHUNK_COUNT,
    TwapFields, TwapRequest, validate_twap,
};
pub use domain::order_execution::{OrderFields, OrderRequest, OrderSide, OrderType, TimeInForce};
pub use domain::shared::{ClientOrderId, ExecutionId, Symbol, ValidationError, VenueOrderId};

// Application re-exports
pub use application::ports::{
    AuditEvent, AuditSink, NoOpAuditSink, OrderAck, OrderVenue, PlaceOrderRequest, Scheduler,
    VenueError, WaitOutcome,
};
pub use application::services::{OutputFormat, ReportRenderer};
pub use application::use_cases::{
    DispatchSettings, ExecuteTwapUseCase, OrderPlacement, PlaceOrderError, PlaceOrderUseCase,
};

// Infrastructure re-exports
pub use infrastructure::{
    BinanceConfig, BinanceEnvironment, BinanceError, BinanceVenueAdapter, RetryConfig,
    SimulatedVenue, TokioScheduler, TracingAuditSink,
};

// Ambient re-exports
pub use config::{Config, ConfigError};
pub use error::{AppError, ErrorCode};
