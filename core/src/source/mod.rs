//! Source adapters
//!
//! Two independent external providers are merged per climb. The primary
//! source is authoritative and required: it supplies the area text and the
//! climb list, and its failure excludes the whole area. The secondary
//! source is supplementary and best-effort: it is searched by climb name,
//! legitimately misses a significant fraction of climbs, and its absence
//! only leaves the secondary bundle empty.
//!
//! The aggregation engine depends solely on the [`PrimaryFetch`] and
//! [`SecondaryFetch`] seams. The concrete adapters sit behind those seams
//! and are themselves generic over transport traits ([`GuidePages`],
//! [`CatalogSession`]) where the page-rendering mechanics live.

mod error;
pub mod fs;
mod primary;
mod secondary;

pub use error::SourceError;
pub use primary::PrimaryAdapter;
pub use secondary::{SecondaryAdapter, SecondaryPacing};

use std::future::Future;

use cragscout_types::{Area, Climb, SecondaryInfo, StyleBreakdown};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Transport documents
// ─────────────────────────────────────────────────────────────────────────────

/// Structured area page produced by a primary transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaDocument {
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteRow>,
}

/// One row of the primary source's route table, plus the per-climb detail
/// page content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRow {
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    /// Raw discipline tag as printed on the page
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub stars: Option<f32>,
    #[serde(default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Rendered secondary catalog page for one climb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub stars: Option<f32>,
    #[serde(default)]
    pub recommends: Option<u32>,
    #[serde(default)]
    pub style: Option<StyleBreakdown>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Outcome of polling a submitted catalog search.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogHit {
    Match(CatalogPage),
    /// The catalog rendered and holds no entry for the name
    NoMatch,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport seams
// ─────────────────────────────────────────────────────────────────────────────

/// Primary transport: fetches the structured page for an area handle.
pub trait GuidePages: Send + Sync {
    fn area_page(
        &self,
        link: &str,
    ) -> impl Future<Output = Result<AreaDocument, SourceError>> + Send;
}

/// Secondary transport: one logical remote session. A search is submitted
/// and then polled until it renders; sessions are never shared across
/// workers.
pub trait CatalogSession: Send {
    fn submit(&mut self, name: &str) -> impl Future<Output = Result<(), SourceError>> + Send;

    /// Poll the submitted search. `Ok(None)` means still rendering.
    fn try_fetch(
        &mut self,
    ) -> impl Future<Output = Result<Option<CatalogHit>, SourceError>> + Send;
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine seams
// ─────────────────────────────────────────────────────────────────────────────

/// What the primary adapter yields for one area.
#[derive(Debug, Clone, Default)]
pub struct AreaData {
    pub descriptions: Vec<String>,
    pub comments: Vec<String>,
    pub climbs: Vec<Climb>,
}

/// Engine seam for the authoritative source. Required per area: an error
/// here is a hard failure for the area and is surfaced to the coordinator.
pub trait PrimaryFetch: Send + Sync {
    fn fetch_area(
        &self,
        area: &Area,
    ) -> impl Future<Output = Result<AreaData, SourceError>> + Send;
}

/// Engine seam for the best-effort source. `Ok(None)` is the expected
/// no-match outcome and is distinct from [`SourceError`].
pub trait SecondaryFetch: Send {
    fn fetch_climb(
        &mut self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SecondaryInfo>, SourceError>> + Send;
}
