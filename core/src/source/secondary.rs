//! Secondary source adapter
//!
//! Searches the secondary catalog by climb name over a single logical
//! session. Three behaviors are part of this adapter's contract: a
//! randomized pause between successive climbs (the remote rate-limits
//! automated traffic), a bounded poll for the search result to render, and
//! mapping a missing entry to `Ok(None)` rather than an error.

use std::time::Duration;

use cragscout_types::{AppConfig, PhotoRef, SecondaryInfo};
use rand::Rng;
use tokio::time::sleep;

use super::{CatalogHit, CatalogPage, CatalogSession, SecondaryFetch, SourceError};
use crate::retry;

/// Pacing bounds for one catalog session.
#[derive(Debug, Clone)]
pub struct SecondaryPacing {
    /// Randomized pause between successive climbs
    pub delay_min: Duration,
    pub delay_max: Duration,
    /// How long to wait for a search to render before concluding no match
    pub page_timeout: Duration,
    /// Interval between readiness polls
    pub poll_interval: Duration,
}

impl SecondaryPacing {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            delay_min: Duration::from_millis(config.secondary_delay_min_ms),
            delay_max: Duration::from_millis(config.secondary_delay_max_ms),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// No pauses and an immediate deadline, for transports that resolve
    /// synchronously (snapshots, tests).
    pub fn immediate() -> Self {
        Self {
            delay_min: Duration::ZERO,
            delay_max: Duration::ZERO,
            page_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
        }
    }
}

impl Default for SecondaryPacing {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

pub struct SecondaryAdapter<C> {
    session: C,
    pacing: SecondaryPacing,
    /// No pause before the first lookup of a session
    paced_once: bool,
}

impl<C: CatalogSession> SecondaryAdapter<C> {
    pub fn new(session: C, pacing: SecondaryPacing) -> Self {
        Self {
            session,
            pacing,
            paced_once: false,
        }
    }

    async fn pace(&mut self) {
        if !self.paced_once {
            self.paced_once = true;
            return;
        }
        let min = self.pacing.delay_min;
        let max = self.pacing.delay_max;
        let wait = if max > min {
            let millis = rand::rng().random_range(min.as_millis() as u64..=max.as_millis() as u64);
            Duration::from_millis(millis)
        } else {
            min
        };
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }
}

impl<C: CatalogSession> SecondaryFetch for SecondaryAdapter<C> {
    async fn fetch_climb(&mut self, name: &str) -> Result<Option<SecondaryInfo>, SourceError> {
        self.pace().await;

        self.session.submit(name).await?;
        let hit = retry::poll_with_deadline(
            self.pacing.page_timeout,
            self.pacing.poll_interval,
            &mut self.session,
            async |session: &mut C| session.try_fetch().await,
        )
        .await?;

        match hit {
            Some(CatalogHit::Match(page)) => Ok(Some(map_page(name, page))),
            Some(CatalogHit::NoMatch) => {
                tracing::debug!(climb = %name, "no catalog entry");
                Ok(None)
            }
            None => {
                tracing::debug!(climb = %name, "search never rendered; treating as no match");
                Ok(None)
            }
        }
    }
}

fn map_page(name: &str, page: CatalogPage) -> SecondaryInfo {
    SecondaryInfo {
        grade: page.grade,
        stars: page.stars,
        recommends: page.recommends,
        style: page.style,
        comments: page.comments,
        photos: page
            .photo_urls
            .iter()
            .map(|url| PhotoRef::for_climb(name, url))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cragscout_types::StyleBreakdown;

    /// Session that renders after a fixed number of polls.
    struct SlowSession {
        hit: CatalogHit,
        polls_until_ready: u32,
        polls: u32,
    }

    impl SlowSession {
        fn new(hit: CatalogHit, polls_until_ready: u32) -> Self {
            Self {
                hit,
                polls_until_ready,
                polls: 0,
            }
        }
    }

    impl CatalogSession for SlowSession {
        async fn submit(&mut self, _name: &str) -> Result<(), SourceError> {
            self.polls = 0;
            Ok(())
        }

        async fn try_fetch(&mut self) -> Result<Option<CatalogHit>, SourceError> {
            self.polls += 1;
            Ok((self.polls > self.polls_until_ready).then(|| self.hit.clone()))
        }
    }

    fn pacing(timeout_ms: u64) -> SecondaryPacing {
        SecondaryPacing {
            delay_min: Duration::ZERO,
            delay_max: Duration::ZERO,
            page_timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(100),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn match_is_mapped_into_the_secondary_bundle() {
        let page = CatalogPage {
            grade: Some("6a+".into()),
            stars: Some(4.5),
            recommends: Some(12),
            style: Some(StyleBreakdown {
                onsight: 3,
                ..StyleBreakdown::default()
            }),
            comments: vec!["classic".into()],
            photo_urls: vec!["https://cat.example.com/p/9.jpg?x=1".into()],
        };
        let session = SlowSession::new(CatalogHit::Match(page), 2);
        let mut adapter = SecondaryAdapter::new(session, pacing(5_000));

        let info = adapter.fetch_climb("Moonbeam").await.unwrap().unwrap();
        assert_eq!(info.grade.as_deref(), Some("6a+"));
        assert_eq!(info.recommends, Some(12));
        assert_eq!(info.photos[0].filename, "Moonbeam9.jpg");
    }

    #[tokio::test(start_paused = true)]
    async fn no_match_is_not_an_error() {
        let session = SlowSession::new(CatalogHit::NoMatch, 0);
        let mut adapter = SecondaryAdapter::new(session, pacing(5_000));
        assert!(adapter.fetch_climb("Ghost Route").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn render_timeout_concludes_no_match() {
        // Never becomes ready inside the deadline
        let session = SlowSession::new(CatalogHit::NoMatch, u32::MAX);
        let mut adapter = SecondaryAdapter::new(session, pacing(1_000));
        assert!(adapter.fetch_climb("Moonbeam").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn session_failure_propagates() {
        struct DeadSession;
        impl CatalogSession for DeadSession {
            async fn submit(&mut self, _name: &str) -> Result<(), SourceError> {
                Err(SourceError::Unavailable {
                    reason: "connection reset".into(),
                })
            }
            async fn try_fetch(&mut self) -> Result<Option<CatalogHit>, SourceError> {
                unreachable!("submit already failed")
            }
        }
        let mut adapter = SecondaryAdapter::new(DeadSession, pacing(1_000));
        assert!(matches!(
            adapter.fetch_climb("Moonbeam").await,
            Err(SourceError::Unavailable { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_successive_climbs_only() {
        let session = SlowSession::new(CatalogHit::NoMatch, 0);
        let mut adapter = SecondaryAdapter::new(
            session,
            SecondaryPacing {
                delay_min: Duration::from_millis(200),
                delay_max: Duration::from_millis(400),
                page_timeout: Duration::from_millis(1_000),
                poll_interval: Duration::from_millis(100),
            },
        );

        let start = tokio::time::Instant::now();
        adapter.fetch_climb("First").await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        adapter.fetch_climb("Second").await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed <= Duration::from_millis(400));
    }
}
