//! Order Venue Port (Driven Port)
//!
//! Interface for placing orders on a trading venue. The engine awaits each
//! call before moving on and never calls it twice for the same chunk.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::order_execution::{OrderSide, OrderType, TimeInForce};
use crate::domain::shared::{ClientOrderId, Symbol, VenueOrderId};

/// Request to place an order on the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceOrderRequest {
    /// Client order ID.
    pub client_order_id: ClientOrderId,
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Quantity, already rounded to venue precision.
    pub quantity: Decimal,
    /// Limit price (limit orders only).
    pub price: Option<Decimal>,
    /// Time in force (limit orders only).
    pub time_in_force: Option<TimeInForce>,
}

impl PlaceOrderRequest {
    /// Create a market order request.
    #[must_use]
    pub const fn market(
        client_order_id: ClientOrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: Decimal,
    ) -> Self {
        Self {
            client_order_id,
            symbol,
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: None,
        }
    }

    /// Create a good-til-canceled limit order request.
    #[must_use]
    pub const fn limit(
        client_order_id: ClientOrderId,
        symbol: Symbol,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            client_order_id,
            symbol,
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
        }
    }
}

/// Immediate acknowledgement from the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAck {
    /// Venue-assigned order ID.
    pub order_id: VenueOrderId,
    /// Client order ID echoed back.
    pub client_order_id: ClientOrderId,
    /// Order status as reported by the venue (e.g. `NEW`).
    pub status: String,
}

/// Order venue port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VenueError {
    /// The venue refused the order.
    #[error("Order rejected ({code}): {reason}")]
    Rejected {
        /// Venue error code.
        code: i64,
        /// Rejection reason.
        reason: String,
    },

    /// Rate limited.
    #[error("Rate limited by venue")]
    RateLimited,

    /// The request never reached the venue.
    #[error("Venue connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Credentials were refused.
    #[error("Venue authentication failed: {message}")]
    AuthenticationFailed {
        /// Error details.
        message: String,
    },

    /// The request may or may not have been accepted.
    #[error("Order status unknown: {message}")]
    UnknownStatus {
        /// Error details.
        message: String,
    },

    /// The venue answered with something unparseable.
    #[error("Invalid venue response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

impl VenueError {
    /// Stable machine-readable name for logs and reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::RateLimited => "rate_limited",
            Self::Connection { .. } => "connection",
            Self::AuthenticationFailed { .. } => "authentication_failed",
            Self::UnknownStatus { .. } => "unknown_status",
            Self::InvalidResponse { .. } => "invalid_response",
        }
    }
}

/// Port for order placement.
#[async_trait]
pub trait OrderVenue: Send + Sync {
    /// Place one order and wait for the venue's acknowledgement.
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderAck, VenueError>;
}
