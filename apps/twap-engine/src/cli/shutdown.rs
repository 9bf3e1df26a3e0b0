//! Two-stage shutdown: the first signal stops the schedule at its next wait,
//! the second one means the operator wants out now.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Cancel `token` on the first signal and return the name of the second.
///
/// `next_signal` resolves once per delivered signal with its name.
pub async fn escalate<F, Fut>(token: CancellationToken, mut next_signal: F) -> &'static str
where
    F: FnMut() -> Fut,
    Fut: Future<Output = &'static str>,
{
    let first = next_signal().await;
    tracing::info!(
        signal = first,
        "Stopping after the current chunk, signal again to exit immediately"
    );
    token.cancel();

    next_signal().await
}
