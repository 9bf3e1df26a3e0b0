//! Order venue adapters.

pub mod binance;
mod simulated;

pub use binance::{BinanceConfig, BinanceEnvironment, BinanceError, BinanceVenueAdapter, RetryConfig};
pub use simulated::SimulatedVenue;
