pub mod aggregate;
pub mod config;
pub mod geo;
pub mod grades;
pub mod index;
pub mod photos;
pub mod retry;
pub mod source;
pub mod stats;
pub mod storage;

// Re-exports for convenience
pub use aggregate::{Aggregator, AreaFailure, BatchOutcome, BatchToken, ResultStore};
pub use cragscout_types::{
    AppConfig, Area, AreaResult, Climb, Discipline, PhotoRef, PrimaryInfo, SearchParams,
    SecondaryInfo, StyleBreakdown,
};
pub use config::{AppConfigExt, ConfigError};
pub use geo::{BoundingBox, GeoError, bounding_box};
pub use grades::{NormalizedGrade, to_yds};
pub use index::{AreaIndex, AreaSeed, IndexError};
pub use source::{
    AreaData, CatalogHit, CatalogPage, CatalogSession, GuidePages, PrimaryAdapter, PrimaryFetch,
    SecondaryAdapter, SecondaryFetch, SecondaryPacing, SourceError,
};
pub use stats::AscentStats;
pub use storage::{ClimbId, SavedClimbRecord, SavedClimbStore, StorageError};
