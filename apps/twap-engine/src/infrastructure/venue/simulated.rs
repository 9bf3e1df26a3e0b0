//! In-process venue that acknowledges orders without touching a network.
//!
//! Backs `--simulate` runs and the integration tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{OrderAck, OrderVenue, PlaceOrderRequest, VenueError};
use crate::domain::shared::VenueOrderId;

const FIRST_ORDER_ID: u64 = 1_000_001;

/// Simulated venue: every order is acknowledged as `NEW` with a sequential ID.
#[derive(Debug)]
pub struct SimulatedVenue {
    next_id: AtomicU64,
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<PlaceOrderRequest>>,
}

impl Default for SimulatedVenue {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedVenue {
    /// Create a venue that accepts every order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(FIRST_ORDER_ID),
            fail_on_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a venue that rejects the given 1-based call.
    #[must_use]
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    /// Orders received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<PlaceOrderRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OrderVenue for SimulatedVenue {
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderAck, VenueError> {
        let call = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(request.clone());
            calls.len()
        };

        if self.fail_on_call == Some(call) {
            tracing::debug!(call, client_order_id = %request.client_order_id, "Simulated rejection");
            return Err(VenueError::Rejected {
                code: -2010,
                reason: "Simulated rejection".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            order_id = id,
            client_order_id = %request.client_order_id,
            "Simulated order acknowledged"
        );

        Ok(OrderAck {
            order_id: VenueOrderId::new(id.to_string()),
            client_order_id: request.client_order_id,
            status: "NEW".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderSide;
    use crate::domain::shared::{ClientOrderId, Symbol};
    use rust_decimal_macros::dec;

    fn request(id: &str) -> PlaceOrderRequest {
        PlaceOrderRequest::limit(
            ClientOrderId::new(id),
            Symbol::new("BTCUSDT"),
            OrderSide::Buy,
            dec!(0.1),
            dec!(60000),
        )
    }

    #[tokio::test]
    async fn acknowledges_with_sequential_ids() {
        let venue = SimulatedVenue::new();
        let first = venue.place_order(request("a")).await.unwrap();
        let second = venue.place_order(request("b")).await.unwrap();

        assert_eq!(first.order_id.as_str(), "1000001");
        assert_eq!(second.order_id.as_str(), "1000002");
        assert_eq!(second.client_order_id.as_str(), "b");
        assert_eq!(first.status, "NEW");
        assert_eq!(venue.calls().len(), 2);
    }

    #[tokio::test]
    async fn rejects_configured_call() {
        let venue = SimulatedVenue::failing_on(2);
        assert!(venue.place_order(request("a")).await.is_ok());
        let err = venue.place_order(request("b")).await.unwrap_err();
        assert!(matches!(err, VenueError::Rejected { .. }));
        // the rejected call is still recorded
        assert_eq!(venue.calls().len(), 2);
    }
}
