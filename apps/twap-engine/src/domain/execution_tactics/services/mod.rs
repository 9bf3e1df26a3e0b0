//! Execution Tactics Domain Services

mod chunk_planner;
mod twap_validator;

pub use chunk_planner::ChunkPlanner;
pub use twap_validator::{MAX_CHUNK_COUNT, validate_twap};
