//! Shared result store
//!
//! The one piece of state mutated by concurrent workers: an ordered
//! collection of completed area results behind a single mutex. Insertion
//! order is worker *completion* order, not discovery order - areas whose
//! secondary lookups finish faster appear earlier. Callers that need
//! discovery order sort by `area.id`.
//!
//! Each search batch carries a generation token. Starting a new batch
//! invalidates every earlier token, so workers left over from a superseded
//! search cannot pollute the newer result set.

use std::sync::Mutex;

use cragscout_types::AreaResult;

/// Token identifying one search batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchToken(u64);

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    results: Vec<AreaResult>,
}

#[derive(Debug, Default)]
pub struct ResultStore {
    inner: Mutex<Inner>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A worker holding the lock only appends; recover from poison
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Clear the store and start a new batch. Tokens from earlier batches
    /// go stale immediately.
    pub fn begin_batch(&self) -> BatchToken {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.results.clear();
        BatchToken(inner.generation)
    }

    /// Append a completed result. Returns false (dropping the result) when
    /// the token belongs to a superseded batch.
    pub fn publish(&self, token: BatchToken, result: AreaResult) -> bool {
        let mut inner = self.lock();
        if inner.generation != token.0 {
            return false;
        }
        inner.results.push(result);
        true
    }

    /// Ordered copy of the current batch's results.
    pub fn snapshot(&self) -> Vec<AreaResult> {
        self.lock().results.clone()
    }

    /// Like [`snapshot`](Self::snapshot), but empty when `token` no longer
    /// identifies the current batch.
    pub fn snapshot_if_current(&self, token: BatchToken) -> Vec<AreaResult> {
        let inner = self.lock();
        if inner.generation == token.0 {
            inner.results.clone()
        } else {
            Vec::new()
        }
    }

    pub fn len(&self) -> usize {
        self.lock().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
