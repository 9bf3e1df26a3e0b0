//! Symbol value object for instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading symbol (futures contract ticker).
///
/// Examples: "BTCUSDT", "ETHUSDT", "ABCUSD".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol.
    ///
    /// The symbol is normalized to uppercase. No format checks happen here;
    /// use `domain::shared::validation::validate_symbol` for untrusted input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_uppercase())
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check that the symbol is non-empty and purely alphanumeric.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_new_normalizes_case() {
        let s = Symbol::new("btcusdt");
        assert_eq!(s.as_str(), "BTCUSDT");
    }

    #[test]
    fn symbol_display() {
        let s = Symbol::new("ETHUSDT");
        assert_eq!(format!("{s}"), "ETHUSDT");
    }

    #[test]
    fn symbol_well_formed() {
        assert!(Symbol::new("BTCUSDT").is_well_formed());
        assert!(Symbol::new("1000PEPEUSDT").is_well_formed());
    }

    #[test]
    fn symbol_not_well_formed() {
        assert!(!Symbol::new("").is_well_formed());
        assert!(!Symbol::new("BTC-USDT").is_well_formed());
        assert!(!Symbol::new("BTC/USDT").is_well_formed());
        assert!(!Symbol::new("BTC USDT").is_well_formed());
    }

    #[test]
    fn symbol_serde_transparent() {
        let s = Symbol::new("BTCUSDT");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"BTCUSDT\"");
    }
}
