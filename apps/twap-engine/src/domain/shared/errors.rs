//! Domain errors for request validation.

use thiserror::Error;

/// Why a caller-supplied request was rejected.
///
/// Raised before any planning or dispatch. Every variant is fatal to the
/// invocation and carries no side effect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Symbol is empty.
    #[error("Symbol must not be empty")]
    EmptySymbol,

    /// Symbol contains separators or punctuation.
    #[error("Invalid symbol format: '{symbol}'")]
    InvalidSymbol {
        /// The rejected symbol.
        symbol: String,
    },

    /// Side is not exactly BUY or SELL.
    #[error("Side must be BUY or SELL, got '{side}'")]
    InvalidSide {
        /// The rejected side.
        side: String,
    },

    /// Quantity is zero or negative.
    #[error("Quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The rejected quantity.
        quantity: String,
    },

    /// Price is zero or negative.
    #[error("Price must be positive, got {price}")]
    NonPositivePrice {
        /// The rejected price.
        price: String,
    },

    /// Chunk count is zero or negative.
    #[error("Number of chunks must be positive, got {chunk_count}")]
    NonPositiveChunkCount {
        /// The rejected chunk count.
        chunk_count: i64,
    },

    /// Chunk count is above the supported maximum.
    #[error("Number of chunks must be at most {max}, got {chunk_count}")]
    ChunkCountTooLarge {
        /// The rejected chunk count.
        chunk_count: i64,
        /// Largest accepted chunk count.
        max: u32,
    },

    /// Interval is negative.
    #[error("Interval must not be negative, got {interval_seconds}s")]
    NegativeInterval {
        /// The rejected interval in seconds.
        interval_seconds: i64,
    },
}

impl ValidationError {
    /// Name of the request field that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptySymbol | Self::InvalidSymbol { .. } => "symbol",
            Self::InvalidSide { .. } => "side",
            Self::NonPositiveQuantity { .. } => "quantity",
            Self::NonPositivePrice { .. } => "price",
            Self::NonPositiveChunkCount { .. } | Self::ChunkCountTooLarge { .. } => "chunks",
            Self::NegativeInterval { .. } => "interval",
        }
    }
}
