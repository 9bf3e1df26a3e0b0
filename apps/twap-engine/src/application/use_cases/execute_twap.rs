//! Execute TWAP Use Case
//!
//! Validate → plan → dispatch. The dispatch loop is strictly sequential: one
//! outstanding order at a time, chunks in index order, no retries, and the
//! first failure ends the run.

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use crate::application::ports::{
    AuditEvent, AuditSink, OrderVenue, PlaceOrderRequest, Scheduler, WaitOutcome,
};
use crate::domain::execution_tactics::{
    ChunkPlan, ChunkPlanner, ChunkResult, ExecutionReport, ExecutionReportBuilder, StopReason,
    TwapFields, TwapRequest, validate_twap,
};
use crate::domain::shared::{ExecutionId, ValidationError};

/// How chunk orders are shaped on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Fractional digits kept when sending a quantity.
    pub quantity_precision: u32,
    /// Fractional digits kept when sending a price.
    pub price_precision: u32,
    /// Prefix for generated client order ids.
    pub client_order_prefix: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            quantity_precision: 8,
            price_precision: 8,
            client_order_prefix: "twap".to_string(),
        }
    }
}

/// Use case for running a TWAP execution.
pub struct ExecuteTwapUseCase<V, S, A>
where
    V: OrderVenue,
    S: Scheduler,
    A: AuditSink,
{
    venue: Arc<V>,
    scheduler: Arc<S>,
    audit: Arc<A>,
    settings: DispatchSettings,
}

impl<V, S, A> ExecuteTwapUseCase<V, S, A>
where
    V: OrderVenue,
    S: Scheduler,
    A: AuditSink,
{
    /// Create a new `ExecuteTwapUseCase`.
    pub const fn new(
        venue: Arc<V>,
        scheduler: Arc<S>,
        audit: Arc<A>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            venue,
            scheduler,
            audit,
            settings,
        }
    }

    /// Validate raw parameters, plan the chunks, and run them.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` before any side effect when the request is
    /// malformed. Every later outcome, including venue failures, is reported
    /// through the returned `ExecutionReport`.
    pub async fn execute(&self, fields: &TwapFields) -> Result<ExecutionReport, ValidationError> {
        let request = validate_twap(fields).inspect_err(|e| {
            tracing::warn!(field = e.field(), error = %e, "TWAP request rejected");
            self.audit.record(&AuditEvent::ValidationFailed {
                field: e.field(),
                reason: e.to_string(),
            });
        })?;

        let plan = ChunkPlanner::plan(&request);
        Ok(self.execute_plan(&request, &plan).await)
    }

    /// Run an already planned request.
    ///
    /// Dry runs record a simulated result per chunk without touching the
    /// venue or the scheduler.
    pub async fn execute_plan(&self, request: &TwapRequest, plan: &ChunkPlan) -> ExecutionReport {
        let execution_id = ExecutionId::generate();
        let span = tracing::info_span!(
            "twap",
            execution_id = %execution_id,
            symbol = %request.symbol(),
            side = %request.side(),
        );
        self.run(execution_id, request, plan).instrument(span).await
    }

    async fn run(
        &self,
        execution_id: ExecutionId,
        request: &TwapRequest,
        plan: &ChunkPlan,
    ) -> ExecutionReport {
        tracing::info!(
            total_quantity = %request.total_quantity(),
            limit_price = %request.limit_price(),
            chunks = request.chunk_count(),
            interval_secs = request.interval().as_secs(),
            dry_run = request.dry_run(),
            "Starting TWAP execution"
        );
        self.audit.record(&AuditEvent::ExecutionStarted {
            execution_id: execution_id.clone(),
            symbol: request.symbol().clone(),
            side: request.side(),
            total_quantity: request.total_quantity(),
            chunk_count: request.chunk_count(),
            interval_secs: request.interval().as_secs(),
            dry_run: request.dry_run(),
        });

        let mut builder = ExecutionReportBuilder::new(execution_id, request.clone(), Utc::now());

        let report = if request.dry_run() {
            for chunk in plan {
                builder.record(ChunkResult::simulated(chunk));
            }
            builder.complete(Utc::now())
        } else {
            self.dispatch_all(request, plan, builder).await
        };

        tracing::info!(
            status = %report.status(),
            executed_quantity = %report.executed_quantity(),
            chunks_recorded = report.results().len(),
            "TWAP execution finished"
        );
        self.audit.record(&AuditEvent::ExecutionFinished {
            execution_id: report.execution_id().clone(),
            status: report.status(),
            executed_quantity: report.executed_quantity(),
            chunks_recorded: report.results().len(),
        });

        report
    }

    async fn dispatch_all(
        &self,
        request: &TwapRequest,
        plan: &ChunkPlan,
        mut builder: ExecutionReportBuilder,
    ) -> ExecutionReport {
        let execution_id = builder.execution_id().clone();
        let price = request.limit_price().round_dp(self.settings.price_precision);
        let last_index = plan.chunks().last().map_or(0, |c| c.index);

        for chunk in plan {
            let quantity = chunk.dispatch_quantity(self.settings.quantity_precision);
            let client_order_id =
                execution_id.client_order_id(&self.settings.client_order_prefix, chunk.index);
            let order = PlaceOrderRequest::limit(
                client_order_id.clone(),
                request.symbol().clone(),
                request.side(),
                quantity,
                price,
            );

            let dispatched_at = Utc::now();
            match self.venue.place_order(order).await {
                Ok(ack) => {
                    tracing::info!(
                        chunk = chunk.index,
                        quantity = %quantity,
                        order_id = %ack.order_id,
                        status = %ack.status,
                        "Chunk dispatched"
                    );
                    self.audit.record(&AuditEvent::ChunkDispatched {
                        execution_id: execution_id.clone(),
                        index: chunk.index,
                        quantity,
                        client_order_id: client_order_id.clone(),
                        order_id: ack.order_id.clone(),
                    });
                    builder.record(ChunkResult::success(
                        chunk,
                        quantity,
                        client_order_id,
                        ack.order_id,
                        ack.status,
                        dispatched_at,
                    ));
                }
                Err(e) => {
                    let reason = e.to_string();
                    tracing::error!(
                        chunk = chunk.index,
                        quantity = %quantity,
                        kind = e.kind(),
                        error = %e,
                        "Chunk dispatch failed, stopping schedule"
                    );
                    self.audit.record(&AuditEvent::ChunkFailed {
                        execution_id: execution_id.clone(),
                        index: chunk.index,
                        quantity,
                        reason: reason.clone(),
                    });
                    builder.record(ChunkResult::failed(
                        chunk,
                        quantity,
                        client_order_id,
                        reason.clone(),
                        dispatched_at,
                    ));
                    return builder.stop(
                        StopReason::DispatchFailed {
                            index: chunk.index,
                            reason,
                        },
                        Utc::now(),
                    );
                }
            }

            if chunk.index == last_index {
                break;
            }

            tracing::debug!(
                wait_secs = request.interval().as_secs(),
                next_chunk = chunk.index + 1,
                "Waiting for next chunk"
            );
            if self.scheduler.wait(request.interval()).await == WaitOutcome::Interrupted {
                tracing::warn!(after_chunk = chunk.index, "TWAP execution interrupted");
                self.audit.record(&AuditEvent::WaitInterrupted {
                    execution_id: execution_id.clone(),
                    after_index: chunk.index,
                });
                return builder.stop(
                    StopReason::Interrupted {
                        after_index: chunk.index,
                    },
                    Utc::now(),
                );
            }
        }

        builder.complete(Utc::now())
    }
}
