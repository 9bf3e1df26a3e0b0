//! Shared value objects.

mod identifiers;
mod symbol;

pub use identifiers::{ClientOrderId, ExecutionId, VenueOrderId};
pub use symbol::Symbol;
