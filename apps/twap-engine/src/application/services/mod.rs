//! Application Services
//!
//! Application services coordinate domain logic and infrastructure adapters.
//! The reporter turns finished executions into operator-facing output.

mod reporter;

pub use reporter::{OutputFormat, ReportRenderer};
