//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer:
//!
//! - `venue/`: Order venues (Binance USD-M futures, in-process simulation)
//! - `scheduler/`: Interruptible waits on the Tokio timer
//! - `audit/`: Audit trail on a dedicated tracing target

pub mod audit;
pub mod scheduler;
pub mod venue;

pub use audit::TracingAuditSink;
pub use scheduler::TokioScheduler;
pub use venue::{
    BinanceConfig, BinanceEnvironment, BinanceError, BinanceVenueAdapter, RetryConfig,
    SimulatedVenue,
};
