//! Execution Tactics Value Objects

mod chunk_plan;
pub(crate) mod duration_secs;
mod execution_report;
mod twap_request;

pub use chunk_plan::{ChunkPlan, ChunkSpec};
pub use execution_report::{
    ChunkOutcome, ChunkResult, ExecutionReport, ExecutionReportBuilder, ExecutionStatus,
    StopReason,
};
pub use twap_request::{TwapFields, TwapRequest};
