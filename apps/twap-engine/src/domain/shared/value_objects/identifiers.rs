//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(ExecutionId, "Unique identifier for one TWAP execution run.");
define_id!(
    ClientOrderId,
    "Client-assigned order identifier sent with each dispatch."
);
define_id!(VenueOrderId, "Venue-assigned order identifier from an acknowledgement.");

impl ExecutionId {
    /// Generate a new unique execution identifier using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Derive the client order id for a chunk of this execution.
    ///
    /// Venues cap client order ids (Binance: 36 chars), so only the first
    /// twelve hex digits of the execution id are used.
    #[must_use]
    pub fn client_order_id(&self, prefix: &str, index: u32) -> ClientOrderId {
        let short: String = self.0.chars().filter(char::is_ascii_alphanumeric).take(12).collect();
        ClientOrderId::new(format!("{prefix}-{short}-{index}"))
    }
}

impl ClientOrderId {
    /// Generate a client order id for a one-shot order.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{prefix}-{}", &uuid[..20]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_id_generate_is_unique() {
        let id1 = ExecutionId::generate();
        let id2 = ExecutionId::generate();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 32);
    }

    #[test]
    fn client_order_id_per_chunk() {
        let id = ExecutionId::new("0123456789abcdef0123456789abcdef");
        assert_eq!(id.client_order_id("twap", 1).as_str(), "twap-0123456789ab-1");
        assert_eq!(id.client_order_id("twap", 12).as_str(), "twap-0123456789ab-12");
    }

    #[test]
    fn client_order_id_fits_venue_limit() {
        let id = ExecutionId::generate();
        let client_id = id.client_order_id("twap", u32::MAX);
        assert!(client_id.as_str().len() <= 36);

        let one_shot = ClientOrderId::generate("limit");
        assert!(one_shot.as_str().len() <= 36);
        assert!(one_shot.as_str().starts_with("limit-"));
    }

    #[test]
    fn venue_order_id_new_and_display() {
        let id = VenueOrderId::new("4056789123");
        assert_eq!(id.as_str(), "4056789123");
        assert_eq!(format!("{id}"), "4056789123");
    }

    #[test]
    fn venue_order_id_from_string() {
        let id: VenueOrderId = "ord-123".into();
        assert_eq!(id.as_str(), "ord-123");

        let id: VenueOrderId = String::from("ord-456").into();
        assert_eq!(id.into_inner(), "ord-456");
    }

    #[test]
    fn serde_roundtrip() {
        let id = VenueOrderId::new("ord-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ord-123\"");

        let parsed: VenueOrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
