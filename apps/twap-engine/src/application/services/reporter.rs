//! Plan and result rendering.
//!
//! Purely presentational: every method takes the report by shared reference
//! and computes nothing the report does not already hold.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::use_cases::OrderPlacement;
use crate::domain::execution_tactics::{ChunkOutcome, ExecutionReport};
use crate::domain::shared::VenueOrderId;

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Renders execution reports and one-shot placements.
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    quantity_precision: u32,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(8)
    }
}

impl ReportRenderer {
    /// Create a renderer that shows quantities at the dispatch precision.
    #[must_use]
    pub const fn new(quantity_precision: u32) -> Self {
        Self { quantity_precision }
    }

    /// Render a report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(
        &self,
        report: &ExecutionReport,
        format: OutputFormat,
    ) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text(report)),
            OutputFormat::Json => serde_json::to_string_pretty(report),
        }
    }

    /// Render a report as text: a plan preview for dry runs, an outcome
    /// summary for live runs.
    #[must_use]
    pub fn render_text(&self, report: &ExecutionReport) -> String {
        if report.dry_run() {
            self.render_plan(report)
        } else {
            self.render_outcome(report)
        }
    }

    fn render_plan(&self, report: &ExecutionReport) -> String {
        let request = report.request();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "TWAP plan (dry run) for {} {} {} at {} in {} chunks every {}s",
            request.side(),
            request.total_quantity().normalize(),
            request.symbol(),
            request.limit_price().normalize(),
            request.chunk_count(),
            request.interval().as_secs(),
        );

        for result in report.results() {
            let _ = write!(
                out,
                "  Order {}: {} {} at ${}",
                result.index,
                self.quantity(result.requested_quantity),
                request.symbol(),
                request.limit_price().normalize(),
            );
            // Offsets past chrono's range only get the relative time.
            let at = TimeDelta::from_std(result.scheduled_offset)
                .ok()
                .and_then(|offset| report.started_at().checked_add_signed(offset));
            if let Some(at) = at {
                let _ = write!(out, " @ {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            let _ = writeln!(out, " (+{}s from start)", result.scheduled_offset.as_secs());
        }

        let span = request.schedule_span();
        let _ = writeln!(
            out,
            "Total execution time: {} seconds (~{} minutes)",
            span.as_secs(),
            minutes(span),
        );
        out
    }

    fn render_outcome(&self, report: &ExecutionReport) -> String {
        let request = report.request();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "TWAP execution {} for {} {} {} at {} in {} chunks every {}s",
            report.execution_id(),
            request.side(),
            request.total_quantity().normalize(),
            request.symbol(),
            request.limit_price().normalize(),
            request.chunk_count(),
            request.interval().as_secs(),
        );

        for result in report.results() {
            let sent = result
                .dispatched_quantity
                .unwrap_or(result.requested_quantity)
                .normalize();
            match &result.outcome {
                ChunkOutcome::Success => {
                    let order_id = result
                        .order_id
                        .as_ref()
                        .map_or("-", |id| id.as_str());
                    let status = result.venue_status.as_deref().unwrap_or("-");
                    let _ = writeln!(
                        out,
                        "  Chunk {}: {sent} -> order {order_id} ({status})",
                        result.index
                    );
                }
                ChunkOutcome::Failed { reason } => {
                    let _ = writeln!(out, "  Chunk {}: {sent} -> FAILED: {reason}", result.index);
                }
                ChunkOutcome::Simulated => {
                    let _ = writeln!(out, "  Chunk {}: {sent} -> simulated", result.index);
                }
            }
        }

        let not_sent = (request.chunk_count() as usize).saturating_sub(report.results().len());
        if not_sent > 0 {
            let _ = writeln!(out, "  {not_sent} chunk(s) not dispatched");
        }

        let _ = writeln!(
            out,
            "Executed quantity: {} of {}",
            report.executed_quantity().normalize(),
            request.total_quantity().normalize(),
        );
        let _ = writeln!(out, "Status: {}", report.status());

        if let Some(reason) = report.stop_reason() {
            let _ = writeln!(out, "Stopped: {reason}");
            let ids: Vec<&str> = report
                .order_ids()
                .into_iter()
                .map(VenueOrderId::as_str)
                .collect();
            if !ids.is_empty() {
                let _ = writeln!(out, "Placed order ids: {}", ids.join(", "));
            }
        }
        out
    }

    /// Render an acknowledged one-shot order as text.
    #[must_use]
    pub fn render_placement_text(&self, placement: &OrderPlacement) -> String {
        let sent = &placement.sent;
        let mut out = String::new();
        let _ = writeln!(out, "{} order placed", sent.order_type);
        let _ = writeln!(out, "  Symbol:   {}", sent.symbol);
        let _ = writeln!(out, "  Side:     {}", sent.side);
        let _ = writeln!(out, "  Quantity: {}", sent.quantity.normalize());
        if let Some(price) = sent.price {
            let _ = writeln!(out, "  Price:    {}", price.normalize());
        }
        let _ = writeln!(out, "  Order ID: {}", placement.ack.order_id);
        let _ = writeln!(out, "  Status:   {}", placement.ack.status);
        out
    }

    /// Render a one-shot placement in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_placement(
        &self,
        placement: &OrderPlacement,
        format: OutputFormat,
    ) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_placement_text(placement)),
            OutputFormat::Json => serde_json::to_string_pretty(placement),
        }
    }

    fn quantity(&self, value: Decimal) -> Decimal {
        value.round_dp(self.quantity_precision).normalize()
    }
}

fn minutes(span: Duration) -> Decimal {
    (Decimal::from(span.as_secs()) / Decimal::from(60))
        .round_dp(1)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NoOpAuditSink, OrderAck, OrderVenue, PlaceOrderRequest};
    use crate::application::ports::{Scheduler, VenueError, WaitOutcome};
    use crate::application::use_cases::{DispatchSettings, ExecuteTwapUseCase};
    use crate::domain::execution_tactics::{ChunkPlanner, TwapFields, validate_twap};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingVenue {
        fail_on: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrderVenue for CountingVenue {
        async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderAck, VenueError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n == self.fail_on {
                return Err(VenueError::Rejected {
                    code: -1013,
                    reason: "Filter failure: LOT_SIZE".to_string(),
                });
            }
            Ok(OrderAck {
                order_id: VenueOrderId::new(format!("{}", 500 + n)),
                client_order_id: request.client_order_id,
                status: "NEW".to_string(),
            })
        }
    }

    struct Immediate;

    #[async_trait]
    impl Scheduler for Immediate {
        async fn wait(&self, _duration: Duration) -> WaitOutcome {
            WaitOutcome::Elapsed
        }
    }

    fn use_case(fail_on: usize) -> ExecuteTwapUseCase<CountingVenue, Immediate, NoOpAuditSink> {
        ExecuteTwapUseCase::new(
            Arc::new(CountingVenue {
                fail_on,
                calls: AtomicUsize::new(0),
            }),
            Arc::new(Immediate),
            Arc::new(NoOpAuditSink),
            DispatchSettings::default(),
        )
    }

    fn fields(chunk_count: i64, interval_seconds: i64, dry_run: bool) -> TwapFields {
        TwapFields {
            symbol: "ABCUSD".to_string(),
            side: "BUY".to_string(),
            total_quantity: dec!(1.0),
            limit_price: dec!(100),
            chunk_count,
            interval_seconds,
            dry_run,
        }
    }

    async fn report(dry_run: bool, fail_on: usize) -> ExecutionReport {
        use_case(fail_on)
            .execute(&fields(4, 60, dry_run))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn dry_run_lists_schedule_and_total_time() {
        let report = report(true, 0).await;
        let text = ReportRenderer::default().render_text(&report);

        assert!(text.contains("TWAP plan (dry run) for BUY 1 ABCUSD at 100 in 4 chunks every 60s"));
        assert!(text.contains("Order 1: 0.25 ABCUSD at $100"));
        assert!(text.contains("(+0s from start)"));
        assert!(text.contains("Order 4: 0.25 ABCUSD at $100"));
        assert!(text.contains("(+180s from start)"));
        assert!(text.contains("Total execution time: 180 seconds (~3 minutes)"));
    }

    #[tokio::test]
    async fn dry_run_with_interval_beyond_calendar_range() {
        let report = use_case(0)
            .execute(&fields(2, 10_000_000_000_000, true))
            .await
            .unwrap();
        let text = ReportRenderer::default().render_text(&report);

        assert!(text.contains("Order 1: 0.5 ABCUSD at $100 @ "));
        assert!(text.contains("Order 2: 0.5 ABCUSD at $100 (+10000000000000s from start)"));
        assert!(text.contains("Total execution time: 10000000000000 seconds"));
    }

    #[tokio::test]
    async fn plan_longer_than_request_does_not_underflow() {
        let request = validate_twap(&fields(2, 0, false)).unwrap();
        let plan = ChunkPlanner::plan(&validate_twap(&fields(4, 0, false)).unwrap());
        let report = use_case(0).execute_plan(&request, &plan).await;
        let text = ReportRenderer::default().render_text(&report);

        assert_eq!(report.results().len(), 4);
        assert!(!text.contains("not dispatched"));
        assert!(text.contains("Chunk 4: 0.25 -> order 504 (NEW)"));
    }

    #[tokio::test]
    async fn live_partial_lists_order_ids_and_stop_reason() {
        let report = report(false, 3).await;
        let text = ReportRenderer::default().render_text(&report);

        assert!(text.contains("Chunk 1: 0.25 -> order 501 (NEW)"));
        assert!(text.contains("Chunk 2: 0.25 -> order 502 (NEW)"));
        assert!(text.contains("Chunk 3: 0.25 -> FAILED: Order rejected (-1013): Filter failure: LOT_SIZE"));
        assert!(text.contains("1 chunk(s) not dispatched"));
        assert!(text.contains("Executed quantity: 0.5 of 1"));
        assert!(text.contains("Status: PARTIALLY_COMPLETED"));
        assert!(text.contains("Stopped: chunk 3 failed"));
        assert!(text.contains("Placed order ids: 501, 502"));
    }

    #[tokio::test]
    async fn live_complete_has_no_stop_section() {
        let report = report(false, 0).await;
        let text = ReportRenderer::default().render_text(&report);

        assert!(text.contains("Status: COMPLETED"));
        assert!(text.contains("Executed quantity: 1 of 1"));
        assert!(!text.contains("Stopped"));
    }

    #[tokio::test]
    async fn json_output_carries_report_fields() {
        let report = report(false, 2).await;
        let json = ReportRenderer::default()
            .render(&report, OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "PARTIALLY_COMPLETED");
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][1]["outcome"]["kind"], "FAILED");
        assert_eq!(value["stop_reason"]["kind"], "DISPATCH_FAILED");
        assert_eq!(value["request"]["symbol"], "ABCUSD");
    }

    #[tokio::test]
    async fn rendering_does_not_alter_report() {
        let report = report(false, 2).await;
        let before = report.clone();
        let renderer = ReportRenderer::default();
        let _ = renderer.render_text(&report);
        let _ = renderer.render(&report, OutputFormat::Json).unwrap();
        assert_eq!(report, before);
    }

    #[test]
    fn minutes_rounds_to_one_decimal() {
        assert_eq!(minutes(Duration::from_secs(90)), dec!(1.5));
        assert_eq!(minutes(Duration::from_secs(100)), dec!(1.7));
        assert_eq!(minutes(Duration::ZERO), Decimal::ZERO);
    }
}
