//! Binance venue adapter implementing `OrderVenue`.

use async_trait::async_trait;

use crate::application::ports::{OrderAck, OrderVenue, PlaceOrderRequest, VenueError};

use super::api_types::BinanceOrderResponse;
use super::config::{BinanceConfig, BinanceEnvironment};
use super::error::BinanceError;
use super::http_client::BinanceHttpClient;

const ORDER_PATH: &str = "/fapi/v1/order";

/// Binance USD-M futures venue adapter.
#[derive(Debug, Clone)]
pub struct BinanceVenueAdapter {
    client: BinanceHttpClient,
    environment: BinanceEnvironment,
}

impl BinanceVenueAdapter {
    /// Create a new Binance venue adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the HTTP client cannot
    /// be built.
    pub fn new(config: BinanceConfig) -> Result<Self, BinanceError> {
        let client = BinanceHttpClient::new(&config)?;
        Ok(Self {
            client,
            environment: config.environment,
        })
    }

    /// Check if we're trading on mainnet.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    /// Query parameters for a new order, in the order they are signed.
    fn order_params(request: &PlaceOrderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", request.symbol.as_str().to_string()),
            ("side", request.side.as_str().to_string()),
            ("type", request.order_type.as_str().to_string()),
            ("quantity", request.quantity.normalize().to_string()),
        ];
        if let Some(price) = request.price {
            params.push(("price", price.normalize().to_string()));
        }
        if let Some(tif) = request.time_in_force {
            params.push(("timeInForce", tif.as_str().to_string()));
        }
        params.push(("newClientOrderId", request.client_order_id.as_str().to_string()));
        params
    }
}

#[async_trait]
impl OrderVenue for BinanceVenueAdapter {
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<OrderAck, VenueError> {
        if self.is_live() {
            tracing::warn!(
                client_order_id = %request.client_order_id,
                symbol = %request.symbol,
                "Submitting MAINNET order - this will execute real trades"
            );
        }

        let params = Self::order_params(&request);

        tracing::info!(
            client_order_id = %request.client_order_id,
            symbol = %request.symbol,
            side = %request.side,
            order_type = request.order_type.as_str(),
            quantity = %request.quantity,
            price = ?request.price,
            environment = %self.environment,
            "Submitting order to Binance"
        );

        let response: BinanceOrderResponse = self
            .client
            .signed_post(ORDER_PATH, &params)
            .await
            .map_err(|e| {
                tracing::warn!(
                    client_order_id = %request.client_order_id,
                    error = %e,
                    "Binance order request failed"
                );
                VenueError::from(e)
            })?;

        tracing::info!(
            client_order_id = %request.client_order_id,
            order_id = response.order_id,
            status = %response.status,
            "Order acknowledged"
        );

        Ok(response.to_order_ack())
    }
}
