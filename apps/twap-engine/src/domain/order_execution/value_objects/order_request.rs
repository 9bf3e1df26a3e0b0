//! One-shot order request.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{OrderSide, OrderType};
use crate::domain::shared::validation::{
    validate_price, validate_quantity, validate_side, validate_symbol,
};
use crate::domain::shared::{Symbol, ValidationError};

/// Raw caller-supplied fields for a single market or limit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFields {
    /// Instrument symbol, already case-normalized.
    pub symbol: String,
    /// Side string, already case-normalized.
    pub side: String,
    /// Quantity to trade.
    pub quantity: Decimal,
    /// Limit price; `None` for a market order.
    pub price: Option<Decimal>,
}

/// A validated one-shot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    symbol: Symbol,
    side: OrderSide,
    quantity: Decimal,
    price: Option<Decimal>,
}

impl OrderRequest {
    /// Validate raw fields with the same rules the TWAP path applies.
    ///
    /// # Errors
    ///
    /// Returns the first failing check in order: symbol, side, quantity, price.
    pub fn validate(fields: &OrderFields) -> Result<Self, ValidationError> {
        let symbol = validate_symbol(&fields.symbol)?;
        let side = validate_side(&fields.side)?;
        let quantity = validate_quantity(fields.quantity)?;
        let price = fields.price.map(validate_price).transpose()?;

        Ok(Self {
            symbol,
            side,
            quantity,
            price,
        })
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Quantity to trade.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Limit price, if any.
    #[must_use]
    pub const fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// LIMIT when a price was given, MARKET otherwise.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        if self.price.is_some() {
            OrderType::Limit
        } else {
            OrderType::Market
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fields() -> OrderFields {
        OrderFields {
            symbol: "BTCUSDT".to_string(),
            side: "BUY".to_string(),
            quantity: dec!(0.01),
            price: Some(dec!(60000)),
        }
    }

    #[test]
    fn limit_order_validates() {
        let request = OrderRequest::validate(&fields()).unwrap();
        assert_eq!(request.symbol().as_str(), "BTCUSDT");
        assert_eq!(request.side(), OrderSide::Buy);
        assert_eq!(request.order_type(), OrderType::Limit);
        assert_eq!(request.price(), Some(dec!(60000)));
    }

    #[test]
    fn market_order_has_no_price() {
        let mut f = fields();
        f.price = None;
        let request = OrderRequest::validate(&f).unwrap();
        assert_eq!(request.order_type(), OrderType::Market);
    }

    #[test]
    fn symbol_checked_before_quantity() {
        let mut f = fields();
        f.symbol = "BTC-USDT".to_string();
        f.quantity = Decimal::ZERO;
        assert!(matches!(
            OrderRequest::validate(&f),
            Err(ValidationError::InvalidSymbol { .. })
        ));
    }

    #[test]
    fn zero_limit_price_rejected() {
        let mut f = fields();
        f.price = Some(Decimal::ZERO);
        assert!(matches!(
            OrderRequest::validate(&f),
            Err(ValidationError::NonPositivePrice { .. })
        ));
    }
}
