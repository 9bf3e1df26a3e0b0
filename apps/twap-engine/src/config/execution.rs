//! Execution configuration.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::DispatchSettings;

/// Dispatch precision and client order ID settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Decimal places sent for quantities.
    #[serde(default = "default_precision")]
    pub quantity_precision: u32,
    /// Decimal places sent for prices.
    #[serde(default = "default_precision")]
    pub price_precision: u32,
    /// Prefix for generated client order IDs.
    #[serde(default = "default_client_order_prefix")]
    pub client_order_prefix: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            quantity_precision: default_precision(),
            price_precision: default_precision(),
            client_order_prefix: default_client_order_prefix(),
        }
    }
}

impl ExecutionConfig {
    /// Settings consumed by the use cases.
    #[must_use]
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            quantity_precision: self.quantity_precision,
            price_precision: self.price_precision,
            client_order_prefix: self.client_order_prefix.clone(),
        }
    }
}

const fn default_precision() -> u32 {
    8
}

fn default_client_order_prefix() -> String {
    "twap".to_string()
}
