//! Audit sink that writes structured events to the `audit` tracing target.
//!
//! Filter with `RUST_LOG=audit=info` or route the target to the JSON log file.

use crate::application::ports::{AuditEvent, AuditSink};

/// Tracing-backed audit sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        match event {
            AuditEvent::ValidationFailed { field, reason } => {
                tracing::warn!(target: "audit", event = "validation_failed", field, %reason);
            }
            AuditEvent::ExecutionStarted {
                execution_id,
                symbol,
                side,
                total_quantity,
                chunk_count,
                interval_secs,
                dry_run,
            } => {
                tracing::info!(
                    target: "audit",
                    event = "execution_started",
                    %execution_id,
                    %symbol,
                    %side,
                    %total_quantity,
                    chunk_count,
                    interval_secs,
                    dry_run,
                );
            }
            AuditEvent::ChunkDispatched {
                execution_id,
                index,
                quantity,
                client_order_id,
                order_id,
            } => {
                tracing::info!(
                    target: "audit",
                    event = "chunk_dispatched",
                    %execution_id,
                    index,
                    %quantity,
                    %client_order_id,
                    %order_id,
                );
            }
            AuditEvent::ChunkFailed {
                execution_id,
                index,
                quantity,
                reason,
            } => {
                tracing::error!(
                    target: "audit",
                    event = "chunk_failed",
                    %execution_id,
                    index,
                    %quantity,
                    %reason,
                );
            }
            AuditEvent::WaitInterrupted {
                execution_id,
                after_index,
            } => {
                tracing::warn!(
                    target: "audit",
                    event = "wait_interrupted",
                    %execution_id,
                    after_index,
                );
            }
            AuditEvent::ExecutionFinished {
                execution_id,
                status,
                executed_quantity,
                chunks_recorded,
            } => {
                tracing::info!(
                    target: "audit",
                    event = "execution_finished",
                    %execution_id,
                    %status,
                    %executed_quantity,
                    chunks_recorded,
                );
            }
            AuditEvent::OrderPlaced {
                client_order_id,
                order_id,
                status,
            } => {
                tracing::info!(
                    target: "audit",
                    event = "order_placed",
                    %client_order_id,
                    %order_id,
                    %status,
                );
            }
            AuditEvent::OrderFailed {
                client_order_id,
                reason,
            } => {
                tracing::error!(
                    target: "audit",
                    event = "order_failed",
                    %client_order_id,
                    %reason,
                );
            }
        }
    }
}
