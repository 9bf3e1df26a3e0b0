//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod execute_twap;
mod place_order;

pub use execute_twap::{DispatchSettings, ExecuteTwapUseCase};
pub use place_order::{OrderPlacement, PlaceOrderError, PlaceOrderUseCase};
