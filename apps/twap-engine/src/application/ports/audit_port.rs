//! Audit Sink Port (Driven Port)
//!
//! Fire-and-forget operational trail. Events never influence control flow.

use rust_decimal::Decimal;

use crate::domain::execution_tactics::ExecutionStatus;
use crate::domain::order_execution::OrderSide;
use crate::domain::shared::{ClientOrderId, ExecutionId, Symbol, VenueOrderId};

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    /// A request failed validation.
    ValidationFailed {
        /// Field that failed.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
    /// A TWAP execution started.
    ExecutionStarted {
        /// Execution ID.
        execution_id: ExecutionId,
        /// Symbol.
        symbol: Symbol,
        /// Side.
        side: OrderSide,
        /// Total quantity.
        total_quantity: Decimal,
        /// Number of chunks.
        chunk_count: u32,
        /// Seconds between chunks.
        interval_secs: u64,
        /// Preview run.
        dry_run: bool,
    },
    /// A chunk was acknowledged by the venue.
    ChunkDispatched {
        /// Execution ID.
        execution_id: ExecutionId,
        /// Chunk index.
        index: u32,
        /// Quantity sent.
        quantity: Decimal,
        /// Client order ID.
        client_order_id: ClientOrderId,
        /// Venue order ID.
        order_id: VenueOrderId,
    },
    /// A chunk dispatch failed.
    ChunkFailed {
        /// Execution ID.
        execution_id: ExecutionId,
        /// Chunk index.
        index: u32,
        /// Quantity sent.
        quantity: Decimal,
        /// Failure reason.
        reason: String,
    },
    /// The wait after a chunk was interrupted.
    WaitInterrupted {
        /// Execution ID.
        execution_id: ExecutionId,
        /// Last dispatched chunk.
        after_index: u32,
    },
    /// A TWAP execution reached its terminal status.
    ExecutionFinished {
        /// Execution ID.
        execution_id: ExecutionId,
        /// Terminal status.
        status: ExecutionStatus,
        /// Quantity acknowledged.
        executed_quantity: Decimal,
        /// Results recorded.
        chunks_recorded: usize,
    },
    /// A one-shot order was acknowledged.
    OrderPlaced {
        /// Client order ID.
        client_order_id: ClientOrderId,
        /// Venue order ID.
        order_id: VenueOrderId,
        /// Venue status.
        status: String,
    },
    /// A one-shot order failed.
    OrderFailed {
        /// Client order ID.
        client_order_id: ClientOrderId,
        /// Failure reason.
        reason: String,
    },
}

/// Port for the audit trail.
pub trait AuditSink: Send + Sync {
    /// Record one event. Must not fail or block.
    fn record(&self, event: &AuditEvent);
}

/// No-op audit sink for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpAuditSink;

impl AuditSink for NoOpAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
