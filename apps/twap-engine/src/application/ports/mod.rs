//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod audit_port;
mod order_venue_port;
mod scheduler_port;

pub use audit_port::{AuditEvent, AuditSink, NoOpAuditSink};
pub use order_venue_port::{OrderAck, OrderVenue, PlaceOrderRequest, VenueError};
pub use scheduler_port::{Scheduler, WaitOutcome};
