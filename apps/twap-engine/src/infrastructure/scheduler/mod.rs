//! Tokio-backed scheduler.
//!
//! Waits are raced against a shared `CancellationToken`; the binary cancels
//! it on Ctrl+C or SIGTERM.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{Scheduler, WaitOutcome};

/// Interruptible sleep on the Tokio timer.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    cancel: CancellationToken,
}

impl TokioScheduler {
    /// Create a scheduler that is interrupted when `cancel` fires.
    #[must_use]
    pub const fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }
}

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn wait(&self, duration: Duration) -> WaitOutcome {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                tracing::debug!(wait_ms = duration.as_millis(), "Wait interrupted");
                WaitOutcome::Interrupted
            }
            () = tokio::time::sleep(duration) => WaitOutcome::Elapsed,
        }
    }
}
