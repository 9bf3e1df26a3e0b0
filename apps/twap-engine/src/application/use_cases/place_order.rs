//! Place Order Use Case
//!
//! One-shot market or limit order through the same venue and validation
//! rules as the TWAP path.

use std::sync::Arc;

use serde::Serialize;

use crate::application::ports::{
    AuditEvent, AuditSink, OrderAck, OrderVenue, PlaceOrderRequest, VenueError,
};
use crate::application::use_cases::DispatchSettings;
use crate::domain::order_execution::{OrderFields, OrderRequest};
use crate::domain::shared::{ClientOrderId, ValidationError};

/// Why a one-shot order did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceOrderError {
    /// Rejected before reaching the venue.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The venue failed or refused the order.
    #[error(transparent)]
    Venue(#[from] VenueError),
}

/// An acknowledged one-shot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPlacement {
    /// The validated order.
    pub request: OrderRequest,
    /// What was actually sent.
    pub sent: PlaceOrderRequest,
    /// Venue acknowledgement.
    pub ack: OrderAck,
}

/// Use case for placing a single order.
pub struct PlaceOrderUseCase<V, A>
where
    V: OrderVenue,
    A: AuditSink,
{
    venue: Arc<V>,
    audit: Arc<A>,
    settings: DispatchSettings,
}

impl<V, A> PlaceOrderUseCase<V, A>
where
    V: OrderVenue,
    A: AuditSink,
{
    /// Create a new `PlaceOrderUseCase`.
    pub const fn new(venue: Arc<V>, audit: Arc<A>, settings: DispatchSettings) -> Self {
        Self {
            venue,
            audit,
            settings,
        }
    }

    /// Validate and place the order. Never retried.
    ///
    /// # Errors
    ///
    /// Returns `PlaceOrderError::Validation` before any venue call, or
    /// `PlaceOrderError::Venue` if the venue call fails.
    pub async fn execute(&self, fields: &OrderFields) -> Result<OrderPlacement, PlaceOrderError> {
        let request = OrderRequest::validate(fields).inspect_err(|e| {
            tracing::warn!(field = e.field(), error = %e, "Order request rejected");
            self.audit.record(&AuditEvent::ValidationFailed {
                field: e.field(),
                reason: e.to_string(),
            });
        })?;

        let client_order_id = ClientOrderId::generate(&self.settings.client_order_prefix);
        let quantity = request.quantity().round_dp(self.settings.quantity_precision);
        let sent = match request.price() {
            Some(price) => PlaceOrderRequest::limit(
                client_order_id.clone(),
                request.symbol().clone(),
                request.side(),
                quantity,
                price.round_dp(self.settings.price_precision),
            ),
            None => PlaceOrderRequest::market(
                client_order_id.clone(),
                request.symbol().clone(),
                request.side(),
                quantity,
            ),
        };

        tracing::info!(
            symbol = %sent.symbol,
            side = %sent.side,
            order_type = %sent.order_type,
            quantity = %sent.quantity,
            price = ?sent.price,
            client_order_id = %client_order_id,
            "Placing order"
        );

        match self.venue.place_order(sent.clone()).await {
            Ok(ack) => {
                tracing::info!(order_id = %ack.order_id, status = %ack.status, "Order placed");
                self.audit.record(&AuditEvent::OrderPlaced {
                    client_order_id,
                    order_id: ack.order_id.clone(),
                    status: ack.status.clone(),
                });
                Ok(OrderPlacement { request, sent, ack })
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Order failed");
                self.audit.record(&AuditEvent::OrderFailed {
                    client_order_id,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }
}
