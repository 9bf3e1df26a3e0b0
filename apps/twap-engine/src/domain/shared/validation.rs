//! Field-level validation rules.
//!
//! One set of checks shared by the TWAP request and the one-shot order
//! request, so both paths reject exactly the same inputs.

use rust_decimal::Decimal;

use super::errors::ValidationError;
use super::value_objects::Symbol;
use crate::domain::order_execution::OrderSide;

/// Symbol must be non-empty and purely alphanumeric.
///
/// # Errors
///
/// Returns `EmptySymbol` or `InvalidSymbol`.
pub fn validate_symbol(raw: &str) -> Result<Symbol, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    let symbol = Symbol::new(raw);
    if !symbol.is_well_formed() {
        return Err(ValidationError::InvalidSymbol {
            symbol: raw.to_string(),
        });
    }
    Ok(symbol)
}

/// Side must be exactly `BUY` or `SELL`. Case normalization is the caller's job.
///
/// # Errors
///
/// Returns `InvalidSide`.
pub fn validate_side(raw: &str) -> Result<OrderSide, ValidationError> {
    raw.parse().map_err(|_| ValidationError::InvalidSide {
        side: raw.to_string(),
    })
}

/// Quantity must be strictly positive.
///
/// # Errors
///
/// Returns `NonPositiveQuantity`.
pub fn validate_quantity(quantity: Decimal) -> Result<Decimal, ValidationError> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity {
            quantity: quantity.to_string(),
        });
    }
    Ok(quantity)
}

/// Price must be strictly positive.
///
/// # Errors
///
/// Returns `NonPositivePrice`.
pub fn validate_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice {
            price: price.to_string(),
        });
    }
    Ok(price)
}
