//! Binance USD-M Futures Venue Adapter
//!
//! Implementation of `OrderVenue` for the Binance futures REST API with:
//! - HMAC-SHA256 signed requests
//! - Retry only where the order provably never reached the venue
//! - Environment-aware safety logging (TESTNET vs MAINNET)

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;
mod signer;

pub use adapter::BinanceVenueAdapter;
pub use config::{BinanceConfig, BinanceEnvironment, RetryConfig};
pub use error::BinanceError;
pub use signer::RequestSigner;
