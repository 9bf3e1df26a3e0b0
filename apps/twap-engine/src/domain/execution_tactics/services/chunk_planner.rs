//! Chunk Planner Domain Service

use rust_decimal::Decimal;

use crate::domain::execution_tactics::value_objects::{ChunkPlan, ChunkSpec, TwapRequest};

/// Derives the chunk schedule for a TWAP request.
///
/// Every chunk but the last gets `total / n`; the last gets
/// `total - base * (n - 1)` so the quantities sum to the total exactly.
/// Chunk `i` is scheduled at `(i - 1) * interval`. Planning is pure: the same
/// request always yields the same plan, so a dry run previews exactly what a
/// live run dispatches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkPlanner;

impl ChunkPlanner {
    /// Build the plan for a validated request.
    #[must_use]
    pub fn plan(request: &TwapRequest) -> ChunkPlan {
        let n = request.chunk_count();
        let total = request.total_quantity();
        let base = total / Decimal::from(n);
        // Accumulated rather than multiplied so that re-summing the plan
        // reproduces `total` exactly at full decimal precision.
        let allocated: Decimal = (1..n).map(|_| base).sum();
        let last = total - allocated;
        let interval = request.interval();

        let chunks = (1..=n)
            .map(|index| {
                let quantity = if index == n { last } else { base };
                ChunkSpec::new(index, quantity, interval.saturating_mul(index - 1))
            })
            .collect();

        ChunkPlan::new(chunks)
    }
}
