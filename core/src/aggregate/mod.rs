//! Aggregation coordinator
//!
//! Fans one worker out per discovered area. Each worker pulls the
//! authoritative page, walks the climb list strictly sequentially against
//! its own secondary session, and publishes the completed area into the
//! shared [`ResultStore`]. A join barrier holds the batch back until every
//! worker has finished, so readers never observe an area whose climb list
//! is mid-mutation.
//!
//! Failure isolation: a primary failure excludes that one area (recorded
//! in the outcome); a secondary failure or miss degrades that one climb.
//! Neither aborts sibling workers.

mod store;


pub use store::{BatchToken, ResultStore};

use std::sync::Arc;

use cragscout_types::{Area, AreaResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::source::{PrimaryFetch, SecondaryFetch, SourceError};

/// Why an area is missing from the published results.
#[derive(Debug)]
pub struct AreaFailure {
    pub area_id: u64,
    pub area_name: String,
    pub error: SourceError,
}

/// Outcome of one aggregation batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Completed areas, in worker completion order
    pub results: Vec<AreaResult>,
    /// How many areas the discovery pass produced
    pub discovered: usize,
    /// Areas excluded by a primary-source failure
    pub failures: Vec<AreaFailure>,
}

impl BatchOutcome {
    /// True when the published set is smaller than the discovery set.
    pub fn is_degraded(&self) -> bool {
        self.results.len() < self.discovered
    }
}

enum WorkerOutcome {
    Completed,
    PrimaryFailed(AreaFailure),
}

pub struct Aggregator<P, F> {
    primary: Arc<P>,
    open_session: F,
    store: Arc<ResultStore>,
    max_parallel: usize,
}

impl<P, F, S> Aggregator<P, F>
where
    P: PrimaryFetch + 'static,
    S: SecondaryFetch + 'static,
    F: Fn() -> S + Clone + Send + Sync + 'static,
{
    /// `open_session` is invoked once per worker: each area gets its own
    /// secondary session, which is never shared across workers.
    pub fn new(primary: P, open_session: F, store: Arc<ResultStore>, max_parallel: usize) -> Self {
        Self {
            primary: Arc::new(primary),
            open_session,
            store,
            max_parallel,
        }
    }

    /// Start a fresh batch (superseding any earlier one) and aggregate
    /// `areas` into it.
    pub async fn run(&self, areas: Vec<Area>) -> BatchOutcome {
        let token = self.store.begin_batch();
        self.run_batch(token, areas).await
    }

    /// Aggregate into an existing batch token. If the token is superseded
    /// mid-flight the surviving workers' publishes are dropped and the
    /// outcome's result set is empty.
    pub async fn run_batch(&self, token: BatchToken, areas: Vec<Area>) -> BatchOutcome {
        let discovered = areas.len();
        let limiter = Arc::new(Semaphore::new(self.max_parallel.max(1)));
        let mut workers: JoinSet<WorkerOutcome> = JoinSet::new();

        for area in areas {
            let primary = Arc::clone(&self.primary);
            let store = Arc::clone(&self.store);
            let limiter = Arc::clone(&limiter);
            let session = (self.open_session)();
            workers.spawn(async move {
                // The semaphore is never closed while workers run
                let _permit = limiter.acquire_owned().await.ok();
                scrape_area(area, primary, session, store, token).await
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(WorkerOutcome::Completed) => {}
                Ok(WorkerOutcome::PrimaryFailed(failure)) => failures.push(failure),
                Err(err) => tracing::error!(%err, "area worker panicked"),
            }
        }

        let results = self.store.snapshot_if_current(token);
        tracing::info!(
            discovered,
            published = results.len(),
            failed = failures.len(),
            "aggregation batch complete"
        );
        BatchOutcome {
            results,
            discovered,
            failures,
        }
    }
}

/// One area worker: required primary fetch, then sequential best-effort
/// secondary fetches, then a single guarded publish.
async fn scrape_area<P: PrimaryFetch, S: SecondaryFetch>(
    mut area: Area,
    primary: Arc<P>,
    mut session: S,
    store: Arc<ResultStore>,
    token: BatchToken,
) -> WorkerOutcome {
    let data = match primary.fetch_area(&area).await {
        Ok(data) => data,
        Err(error) => {
            tracing::warn!(area = %area.name, %error, "primary source failed; excluding area");
            return WorkerOutcome::PrimaryFailed(AreaFailure {
                area_id: area.id,
                area_name: area.name,
                error,
            });
        }
    };
    area.descriptions.extend(data.descriptions);
    area.comments.extend(data.comments);
    area.climbs = data.climbs;

    for climb in &mut area.climbs {
        match session.fetch_climb(&climb.name).await {
            Ok(Some(info)) => climb.secondary = info,
            Ok(None) => {
                tracing::debug!(area = %area.name, climb = %climb.name, "no secondary match");
            }
            Err(error) => {
                tracing::warn!(
                    area = %area.name,
                    climb = %climb.name,
                    %error,
                    "secondary source failed; keeping primary data only"
                );
            }
        }
    }

    if !store.publish(token, AreaResult::new(area)) {
        tracing::debug!("batch superseded; dropping late result");
    }
    WorkerOutcome::Completed
}
