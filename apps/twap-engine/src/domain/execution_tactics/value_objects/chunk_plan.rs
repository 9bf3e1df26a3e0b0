//! Chunk plan value objects.

use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;

use super::duration_secs;

/// One planned child order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSpec {
    /// Position in the schedule (1-based).
    pub index: u32,
    /// Unrounded quantity for this chunk.
    pub quantity: Decimal,
    /// Offset from the start of the execution.
    #[serde(rename = "offset_seconds", serialize_with = "duration_secs::serialize")]
    pub scheduled_offset: Duration,
}

impl ChunkSpec {
    /// Create a new chunk spec.
    #[must_use]
    pub const fn new(index: u32, quantity: Decimal, scheduled_offset: Duration) -> Self {
        Self {
            index,
            quantity,
            scheduled_offset,
        }
    }

    /// Quantity rounded to the venue's precision, as dispatched.
    #[must_use]
    pub fn dispatch_quantity(&self, precision: u32) -> Decimal {
        self.quantity.round_dp(precision)
    }
}

/// Ordered sequence of chunks derived from a request. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkPlan {
    chunks: Vec<ChunkSpec>,
}

impl ChunkPlan {
    pub(crate) const fn new(chunks: Vec<ChunkSpec>) -> Self {
        Self { chunks }
    }

    /// The planned chunks in dispatch order.
    #[must_use]
    pub fn chunks(&self) -> &[ChunkSpec] {
        &self.chunks
    }

    /// Number of chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the plan has no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate chunks in dispatch order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChunkSpec> {
        self.chunks.iter()
    }

    /// Sum of all chunk quantities.
    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        self.chunks.iter().map(|c| c.quantity).sum()
    }

    /// Offset of the last chunk.
    #[must_use]
    pub fn span(&self) -> Duration {
        self.chunks
            .last()
            .map_or(Duration::ZERO, |c| c.scheduled_offset)
    }
}

impl<'a> IntoIterator for &'a ChunkPlan {
    type Item = &'a ChunkSpec;
    type IntoIter = std::slice::Iter<'a, ChunkSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
