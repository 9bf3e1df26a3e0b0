//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic (validation, planning)
//!
//! # Bounded Contexts
//!
//! - [`order_execution`]: Single-order vocabulary (side, type, time in force)
//! - [`execution_tactics`]: TWAP request, chunk plan, and execution report
//! - [`shared`]: Identifiers, symbols, and the shared validation rules

pub mod execution_tactics;
pub mod order_execution;
pub mod shared;
