//! Shared Kernel
//!
//! Value objects and validation rules used by more than one bounded context.

pub mod errors;
pub mod validation;
pub mod value_objects;

pub use errors::ValidationError;
pub use value_objects::{ClientOrderId, ExecutionId, Symbol, VenueOrderId};
