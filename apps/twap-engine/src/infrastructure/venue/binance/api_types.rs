//! Binance futures API request and response types.
//!
//! These types map directly to the Binance USD-M futures REST format.

use serde::Deserialize;

use crate::application::ports::OrderAck;
use crate::domain::shared::{ClientOrderId, VenueOrderId};

/// Order response from `POST /fapi/v1/order`.
///
/// Only the acknowledgement fields are read; the rest of the body is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrderResponse {
    /// Venue order ID.
    pub order_id: i64,
    /// Order status (NEW, PARTIALLY_FILLED, FILLED, ...).
    pub status: String,
    /// Client order ID echoed back.
    pub client_order_id: String,
}

impl BinanceOrderResponse {
    /// Convert to the port's acknowledgement type.
    #[must_use]
    pub fn to_order_ack(&self) -> OrderAck {
        OrderAck {
            order_id: VenueOrderId::new(self.order_id.to_string()),
            client_order_id: ClientOrderId::new(self.client_order_id.clone()),
            status: self.status.clone(),
        }
    }
}

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorResponse {
    /// Binance error code (negative).
    pub code: i64,
    /// Error message.
    pub msg: String,
}
