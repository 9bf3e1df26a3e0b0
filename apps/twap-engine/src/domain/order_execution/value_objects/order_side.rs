//! Order side (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl OrderSide {
    /// Wire representation used by the venue.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

/// Error returned when a side string is not exactly `BUY` or `SELL`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Side must be BUY or SELL, got '{0}'")]
pub struct ParseSideError(pub String);

impl FromStr for OrderSide {
    type Err = ParseSideError;

    /// Parses the exact uppercase forms only; callers normalize case first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(ParseSideError(other.to_string())),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_side_display() {
        assert_eq!(format!("{}", OrderSide::Buy), "BUY");
        assert_eq!(format!("{}", OrderSide::Sell), "SELL");
    }

    #[test]
    fn order_side_parse_exact() {
        assert_eq!("BUY".parse::<OrderSide>(), Ok(OrderSide::Buy));
        assert_eq!("SELL".parse::<OrderSide>(), Ok(OrderSide::Sell));
    }

    #[test]
    fn order_side_parse_rejects_lowercase_and_others() {
        assert!("buy".parse::<OrderSide>().is_err());
        assert!("HOLD".parse::<OrderSide>().is_err());
        assert!("".parse::<OrderSide>().is_err());
    }

    #[test]
    fn order_side_serde() {
        let json = serde_json::to_string(&OrderSide::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");

        let parsed: OrderSide = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(parsed, OrderSide::Sell);
    }
}
