//! Bounded poll-until-ready
//!
//! Remote pages render asynchronously, so adapters wait by polling with a
//! deadline instead of blocking indefinitely. Deadline expiry is an
//! ordinary outcome for the caller to interpret (usually "not found"),
//! never a hang.

use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Poll `op` against `state` until it yields a value or `timeout` elapses,
/// sleeping `interval` between attempts. `op` runs at least once;
/// `Ok(None)` means the deadline expired. Errors from `op` abort the wait.
pub async fn poll_with_deadline<S, T, E>(
    timeout: Duration,
    interval: Duration,
    state: &mut S,
    mut op: impl AsyncFnMut(&mut S) -> Result<Option<T>, E>,
) -> Result<Option<T>, E> {
    let start = Instant::now();
    loop {
        if let Some(value) = op(state).await? {
            return Ok(Some(value));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        sleep(interval).await;
    }
}
