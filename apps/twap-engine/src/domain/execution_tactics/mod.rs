//! Execution Tactics Bounded Context
//!
//! TWAP execution: a large order is split into equal child orders dispatched
//! at a fixed interval. This context owns the pure parts of that pipeline:
//! request validation, chunk planning, and the report types the engine fills.

pub mod services;
pub mod value_objects;

pub use services::{ChunkPlanner, MAX_CHUNK_COUNT, validate_twap};
pub use value_objects::{
    ChunkOutcome, ChunkPlan, ChunkResult, ChunkSpec, ExecutionReport, ExecutionReportBuilder,
    ExecutionStatus, StopReason, TwapFields, TwapRequest,
};
