//! Execution report value objects.
//!
//! The engine appends one `ChunkResult` per dispatch attempt through an
//! `ExecutionReportBuilder`; once finished, the `ExecutionReport` is read-only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::duration_secs;
use super::{ChunkSpec, TwapRequest};
use crate::domain::shared::{ClientOrderId, ExecutionId, VenueOrderId};

/// What happened to one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChunkOutcome {
    /// The venue acknowledged the order.
    Success,
    /// Dry run; nothing was sent.
    Simulated,
    /// The venue rejected the order or the call failed.
    Failed {
        /// Failure reason reported by the venue adapter.
        reason: String,
    },
}

impl ChunkOutcome {
    /// Returns true for an acknowledged live order.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkResult {
    /// Chunk index (1-based).
    pub index: u32,
    /// Unrounded quantity from the plan.
    pub requested_quantity: Decimal,
    /// Planned offset from the execution start.
    #[serde(rename = "offset_seconds", serialize_with = "duration_secs::serialize")]
    pub scheduled_offset: Duration,
    /// Quantity actually sent after rounding to venue precision.
    pub dispatched_quantity: Option<Decimal>,
    /// Client order id sent with the request.
    pub client_order_id: Option<ClientOrderId>,
    /// Venue order id, present only on success.
    pub order_id: Option<VenueOrderId>,
    /// Order status string from the acknowledgement.
    pub venue_status: Option<String>,
    /// When the request was sent.
    pub dispatched_at: Option<DateTime<Utc>>,
    /// Outcome of the attempt.
    pub outcome: ChunkOutcome,
}

impl ChunkResult {
    /// A dry-run result: nothing sent, no order id.
    #[must_use]
    pub const fn simulated(chunk: &ChunkSpec) -> Self {
        Self {
            index: chunk.index,
            requested_quantity: chunk.quantity,
            scheduled_offset: chunk.scheduled_offset,
            dispatched_quantity: None,
            client_order_id: None,
            order_id: None,
            venue_status: None,
            dispatched_at: None,
            outcome: ChunkOutcome::Simulated,
        }
    }

    /// An acknowledged live dispatch.
    #[must_use]
    pub const fn success(
        chunk: &ChunkSpec,
        dispatched_quantity: Decimal,
        client_order_id: ClientOrderId,
        order_id: VenueOrderId,
        venue_status: String,
        dispatched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            index: chunk.index,
            requested_quantity: chunk.quantity,
            scheduled_offset: chunk.scheduled_offset,
            dispatched_quantity: Some(dispatched_quantity),
            client_order_id: Some(client_order_id),
            order_id: Some(order_id),
            venue_status: Some(venue_status),
            dispatched_at: Some(dispatched_at),
            outcome: ChunkOutcome::Success,
        }
    }

    /// A failed live dispatch.
    #[must_use]
    pub const fn failed(
        chunk: &ChunkSpec,
        dispatched_quantity: Decimal,
        client_order_id: ClientOrderId,
        reason: String,
        dispatched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            index: chunk.index,
            requested_quantity: chunk.quantity,
            scheduled_offset: chunk.scheduled_offset,
            dispatched_quantity: Some(dispatched_quantity),
            client_order_id: Some(client_order_id),
            order_id: None,
            venue_status: None,
            dispatched_at: Some(dispatched_at),
            outcome: ChunkOutcome::Failed { reason },
        }
    }
}

/// Terminal status of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Every chunk was dispatched (or simulated) successfully.
    Completed,
    /// At least one chunk succeeded before the run stopped.
    PartiallyCompleted,
    /// The first chunk failed.
    Failed,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "COMPLETED",
            Self::PartiallyCompleted => "PARTIALLY_COMPLETED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Why the dispatch loop ended before the last chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopReason {
    /// The venue failed a chunk.
    DispatchFailed {
        /// Index of the failed chunk.
        index: u32,
        /// Failure reason.
        reason: String,
    },
    /// The wait after a chunk was interrupted.
    Interrupted {
        /// Index of the last dispatched chunk.
        after_index: u32,
    },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DispatchFailed { index, reason } => {
                write!(f, "chunk {index} failed: {reason}")
            }
            Self::Interrupted { after_index } => {
                write!(f, "interrupted after chunk {after_index}")
            }
        }
    }
}

/// Outcome of one TWAP execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    execution_id: ExecutionId,
    request: TwapRequest,
    results: Vec<ChunkResult>,
    executed_quantity: Decimal,
    status: ExecutionStatus,
    stop_reason: Option<StopReason>,
    dry_run: bool,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl ExecutionReport {
    /// Execution identifier.
    #[must_use]
    pub const fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    /// Snapshot of the request that was executed.
    #[must_use]
    pub const fn request(&self) -> &TwapRequest {
        &self.request
    }

    /// Per-chunk results in dispatch order. May be shorter than the plan.
    #[must_use]
    pub fn results(&self) -> &[ChunkResult] {
        &self.results
    }

    /// Sum of the requested quantities of successful chunks.
    #[must_use]
    pub const fn executed_quantity(&self) -> Decimal {
        self.executed_quantity
    }

    /// Terminal status.
    #[must_use]
    pub const fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Why the run ended early, if it did.
    #[must_use]
    pub const fn stop_reason(&self) -> Option<&StopReason> {
        self.stop_reason.as_ref()
    }

    /// Whether this was a preview run.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// When the engine started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the engine returned.
    #[must_use]
    pub const fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Number of acknowledged chunks.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    /// Venue order ids of acknowledged chunks, in dispatch order.
    #[must_use]
    pub fn order_ids(&self) -> Vec<&VenueOrderId> {
        self.results
            .iter()
            .filter_map(|r| r.order_id.as_ref())
            .collect()
    }
}

/// Accumulates results while the engine runs.
#[derive(Debug)]
pub struct ExecutionReportBuilder {
    execution_id: ExecutionId,
    request: TwapRequest,
    results: Vec<ChunkResult>,
    executed_quantity: Decimal,
    started_at: DateTime<Utc>,
}

impl ExecutionReportBuilder {
    /// Start a report for a request.
    #[must_use]
    pub fn new(execution_id: ExecutionId, request: TwapRequest, started_at: DateTime<Utc>) -> Self {
        let capacity = request.chunk_count() as usize;
        Self {
            execution_id,
            request,
            results: Vec::with_capacity(capacity),
            executed_quantity: Decimal::ZERO,
            started_at,
        }
    }

    /// Execution identifier.
    #[must_use]
    pub const fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    /// Append a chunk result. Successful chunks add their requested quantity.
    pub fn record(&mut self, result: ChunkResult) {
        if result.outcome.is_success() {
            self.executed_quantity += result.requested_quantity;
        }
        self.results.push(result);
    }

    /// Number of results recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Every chunk went through.
    #[must_use]
    pub fn complete(self, finished_at: DateTime<Utc>) -> ExecutionReport {
        self.finish(ExecutionStatus::Completed, None, finished_at)
    }

    /// The loop ended early.
    ///
    /// A dispatch failure yields `Failed` when nothing succeeded before it and
    /// `PartiallyCompleted` otherwise. An interrupt always yields
    /// `PartiallyCompleted`.
    #[must_use]
    pub fn stop(self, reason: StopReason, finished_at: DateTime<Utc>) -> ExecutionReport {
        let any_success = self.results.iter().any(|r| r.outcome.is_success());
        let status = match reason {
            StopReason::DispatchFailed { .. } if !any_success => ExecutionStatus::Failed,
            _ => ExecutionStatus::PartiallyCompleted,
        };
        self.finish(status, Some(reason), finished_at)
    }

    fn finish(
        self,
        status: ExecutionStatus,
        stop_reason: Option<StopReason>,
        finished_at: DateTime<Utc>,
    ) -> ExecutionReport {
        let dry_run = self.request.dry_run();
        ExecutionReport {
            execution_id: self.execution_id,
            request: self.request,
            results: self.results,
            executed_quantity: self.executed_quantity,
            status,
            stop_reason,
            dry_run,
            started_at: self.started_at,
            finished_at,
        }
    }
}
