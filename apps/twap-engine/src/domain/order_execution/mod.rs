//! Order Execution Bounded Context
//!
//! Single-order vocabulary shared by one-shot orders and TWAP child orders:
//! side, order type, time in force, and the validated one-shot order request.

pub mod value_objects;

pub use value_objects::{OrderFields, OrderRequest, OrderSide, OrderType, TimeInForce};
