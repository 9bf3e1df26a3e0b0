//! Scheduler Port (Driven Port)
//!
//! The single suspension point of the engine: wait between chunks.

use async_trait::async_trait;
use std::time::Duration;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration passed.
    Elapsed,
    /// The wait was cut short by an external stop request.
    Interrupted,
}

/// Port for interruptible waiting.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Suspend for `duration` unless interrupted first.
    ///
    /// A zero duration still observes a pending interrupt.
    async fn wait(&self, duration: Duration) -> WaitOutcome;
}
