//! TWAP request value objects.

use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

use super::duration_secs;
use crate::domain::order_execution::OrderSide;
use crate::domain::shared::Symbol;

/// Raw caller-supplied parameters for a TWAP execution.
///
/// Numeric fields keep their signed raw types so that the validator, not the
/// argument parser, decides what is out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwapFields {
    /// Instrument symbol, already case-normalized.
    pub symbol: String,
    /// Side string, already case-normalized.
    pub side: String,
    /// Total quantity to execute across all chunks.
    pub total_quantity: Decimal,
    /// Limit price used for every chunk.
    pub limit_price: Decimal,
    /// Number of child orders.
    pub chunk_count: i64,
    /// Seconds between dispatches.
    pub interval_seconds: i64,
    /// Preview the plan without placing orders.
    pub dry_run: bool,
}

/// A validated TWAP request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwapRequest {
    symbol: Symbol,
    side: OrderSide,
    total_quantity: Decimal,
    limit_price: Decimal,
    chunk_count: u32,
    #[serde(rename = "interval_seconds", serialize_with = "duration_secs::serialize")]
    interval: Duration,
    dry_run: bool,
}

impl TwapRequest {
    pub(crate) const fn new(
        symbol: Symbol,
        side: OrderSide,
        total_quantity: Decimal,
        limit_price: Decimal,
        chunk_count: u32,
        interval: Duration,
        dry_run: bool,
    ) -> Self {
        Self {
            symbol,
            side,
            total_quantity,
            limit_price,
            chunk_count,
            interval,
            dry_run,
        }
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Order side shared by every chunk.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Total quantity to execute.
    #[must_use]
    pub const fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    /// Limit price shared by every chunk.
    #[must_use]
    pub const fn limit_price(&self) -> Decimal {
        self.limit_price
    }

    /// Number of chunks, at least one.
    #[must_use]
    pub const fn chunk_count(&self) -> u32 {
        self.chunk_count
    }

    /// Wait between consecutive dispatches.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether this is a preview run.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Time from the first dispatch to the last: `(chunk_count - 1) * interval`.
    #[must_use]
    pub fn schedule_span(&self) -> Duration {
        self.interval.saturating_mul(self.chunk_count - 1)
    }
}
