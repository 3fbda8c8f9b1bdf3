//! Shared model and configuration types for cragscout
//!
//! This crate contains the serializable domain model shared between the
//! aggregation engine (cragscout-core) and its front ends: areas, climbs,
//! the per-source data bundles merged by the engine, and the persisted
//! application configuration.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Discipline
// ─────────────────────────────────────────────────────────────────────────────

/// Climbing discipline - governs which grade table and filters apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Discipline {
    TopRope,
    Sport,
    Trad,
    Boulder,
    /// Source page carried no recognizable discipline tag
    #[default]
    Unknown,
}

impl Discipline {
    /// Parse the discipline tag as the primary source prints it ("Sport",
    /// "Trad", "TR", "Toprope", "Boulder"). Anything else is Unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "tr" | "toprope" | "top rope" | "top-rope" => Discipline::TopRope,
            "sport" => Discipline::Sport,
            "trad" => Discipline::Trad,
            "boulder" | "bouldering" => Discipline::Boulder,
            _ => Discipline::Unknown,
        }
    }

    /// Returns true for disciplines graded on the route scale (YDS/French)
    /// as opposed to the boulder scale (V/Font).
    pub fn uses_route_grades(&self) -> bool {
        matches!(
            self,
            Discipline::TopRope | Discipline::Sport | Discipline::Trad
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Discipline::TopRope => "Top Rope",
            Discipline::Sport => "Sport",
            Discipline::Trad => "Trad",
            Discipline::Boulder => "Boulder",
            Discipline::Unknown => "Unknown",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style breakdown
// ─────────────────────────────────────────────────────────────────────────────

/// Per-ascent-style counts reported by the secondary source.
///
/// The five styles are a closed set; all counts are present in every
/// breakdown (zero when the source reported none of that style), so
/// consumers never see a partial map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBreakdown {
    pub redpoint: u32,
    pub flash: u32,
    pub go: u32,
    pub top_rope: u32,
    pub onsight: u32,
}

impl StyleBreakdown {
    /// Total ascents across every style.
    pub fn total(&self) -> u32 {
        self.redpoint + self.flash + self.go + self.top_rope + self.onsight
    }

    /// Counts in display order: redpoint, flash, go, top rope, onsight.
    pub fn counts(&self) -> [u32; 5] {
        [self.redpoint, self.flash, self.go, self.top_rope, self.onsight]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Photos
// ─────────────────────────────────────────────────────────────────────────────

/// Reference to a photo hosted by one of the sources.
///
/// The engine records the URL and a derived local filename only; byte
/// download belongs to the photo collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub url: String,
    pub filename: String,
}

impl PhotoRef {
    /// Derive the local filename from the climb name plus the URL basename,
    /// with any query string stripped.
    pub fn for_climb(climb_name: &str, url: &str) -> Self {
        let basename = url
            .rsplit('/')
            .next()
            .unwrap_or(url)
            .split('?')
            .next()
            .unwrap_or_default();
        Self {
            url: url.to_string(),
            filename: format!("{climb_name}{basename}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-source bundles
// ─────────────────────────────────────────────────────────────────────────────

/// Data scraped from the primary (authoritative) source for one climb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryInfo {
    /// Star rating, 0-5
    pub stars: Option<f32>,
    /// Number of user ratings behind `stars`
    pub rating_count: Option<u32>,
    /// Native grade string (YDS vocabulary, e.g. "5.10b" or "V4")
    pub grade: Option<String>,
    pub descriptions: Vec<String>,
    pub comments: Vec<String>,
    pub photos: Vec<PhotoRef>,
}

/// Data scraped from the secondary (best-effort) source for one climb.
///
/// Every field may be absent: the climb may not exist in the secondary
/// catalog at all, or its page may lack individual sections. An
/// all-default bundle means "no secondary match".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryInfo {
    /// Native grade string (French/Font vocabulary, e.g. "6a+")
    pub grade: Option<String>,
    pub stars: Option<f32>,
    pub recommends: Option<u32>,
    pub style: Option<StyleBreakdown>,
    pub comments: Vec<String>,
    pub photos: Vec<PhotoRef>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Climb / Area
// ─────────────────────────────────────────────────────────────────────────────

/// One route or boulder problem, merged from both sources.
///
/// `name` is the join key used to look the climb up in the secondary
/// catalog and is never empty. Derived figures (total ascents, onsight
/// rate) are computed from `secondary.style` on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Climb {
    pub name: String,
    pub discipline: Discipline,
    pub primary: PrimaryInfo,
    pub secondary: SecondaryInfo,
}

impl Climb {
    pub fn new(name: impl Into<String>, discipline: Discipline) -> Self {
        Self {
            name: name.into(),
            discipline,
            ..Self::default()
        }
    }

    /// True once a secondary match contributed any data.
    pub fn has_secondary(&self) -> bool {
        self.secondary != SecondaryInfo::default()
    }
}

/// A named climbing location with coordinates and its owned climbs.
///
/// The id is assigned once at discovery time and never changes; the climb
/// list order is the primary source's listing order and is stable after
/// aggregation completes (front ends navigate it by index).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Stable primary-source handle for this area
    pub link: String,
    pub descriptions: Vec<String>,
    pub comments: Vec<String>,
    #[serde(default)]
    pub climbs: Vec<Climb>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregation results
// ─────────────────────────────────────────────────────────────────────────────

/// A fully aggregated area paired with a cursor into its climb list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaResult {
    pub area: Area,
    pub climb_cursor: usize,
}

impl AreaResult {
    pub fn new(area: Area) -> Self {
        Self {
            area,
            climb_cursor: 0,
        }
    }

    pub fn current_climb(&self) -> Option<&Climb> {
        self.area.climbs.get(self.climb_cursor)
    }

    /// Move the cursor by `step` (±1), staying inside the climb list.
    /// Returns true if the cursor moved.
    pub fn step_climb(&mut self, step: i64) -> bool {
        let target = self.climb_cursor as i64 + step;
        if target >= 0 && (target as usize) < self.area.climbs.len() {
            self.climb_cursor = target as usize;
            true
        } else {
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search parameters
// ─────────────────────────────────────────────────────────────────────────────

/// User-supplied search request, validated before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_miles: f64,
    /// Restrict results to one discipline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<Discipline>,
}

impl SearchParams {
    /// Reject malformed input up front so invalid values never reach a
    /// worker. Mirrors the checks the reference front end applied.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err("latitude must be a number in [-90, 90]");
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err("longitude must be a number in [-180, 180]");
        }
        if !self.radius_miles.is_finite() || self.radius_miles < 0.0 {
            return Err("radius must be a non-negative number of miles");
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted application configuration.
///
/// The struct lives here so every front end shares one schema; loading and
/// saving are provided by an extension trait in cragscout-core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding area index and source snapshots
    pub data_directory: String,
    /// Directory photo downloads are categorized under
    pub image_directory: String,
    /// Lower bound of the randomized pause between secondary lookups
    pub secondary_delay_min_ms: u64,
    /// Upper bound of the randomized pause between secondary lookups
    pub secondary_delay_max_ms: u64,
    /// How long to wait for a secondary search to render before treating
    /// the climb as not found
    pub page_timeout_secs: u64,
    /// Interval between readiness polls while waiting on a page
    pub poll_interval_ms: u64,
    /// Cap on concurrently scraped areas
    pub max_parallel_areas: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: String::new(),
            image_directory: String::new(),
            secondary_delay_min_ms: 1_000,
            secondary_delay_max_ms: 3_000,
            page_timeout_secs: 30,
            poll_interval_ms: 500,
            max_parallel_areas: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discipline_tag_parsing() {
        assert_eq!(Discipline::from_tag("Sport"), Discipline::Sport);
        assert_eq!(Discipline::from_tag("TR"), Discipline::TopRope);
        assert_eq!(Discipline::from_tag("trad "), Discipline::Trad);
        assert_eq!(Discipline::from_tag("Boulder"), Discipline::Boulder);
        assert_eq!(Discipline::from_tag("Aid"), Discipline::Unknown);
    }

    #[test]
    fn style_breakdown_total_sums_all_five() {
        let style = StyleBreakdown {
            redpoint: 2,
            flash: 1,
            go: 0,
            top_rope: 0,
            onsight: 7,
        };
        assert_eq!(style.total(), 10);
        assert_eq!(StyleBreakdown::default().total(), 0);
    }

    #[test]
    fn photo_filename_strips_query_and_path() {
        let photo = PhotoRef::for_climb(
            "Midnight Lightning",
            "https://img.example.com/p/12345.jpg?w=640&h=480",
        );
        assert_eq!(photo.filename, "Midnight Lightning12345.jpg");
        assert_eq!(photo.url, "https://img.example.com/p/12345.jpg?w=640&h=480");
    }

    #[test]
    fn climb_cursor_stays_in_bounds() {
        let mut area = Area::default();
        area.climbs = vec![
            Climb::new("A", Discipline::Sport),
            Climb::new("B", Discipline::Sport),
        ];
        let mut result = AreaResult::new(area);
        assert!(!result.step_climb(-1));
        assert!(result.step_climb(1));
        assert_eq!(result.current_climb().unwrap().name, "B");
        assert!(!result.step_climb(1));
    }

    #[test]
    fn search_params_validation() {
        let valid = SearchParams {
            latitude: 37.2,
            longitude: -119.1,
            radius_miles: 25.0,
            discipline: None,
        };
        assert!(valid.validate().is_ok());

        let mut bad = valid.clone();
        bad.latitude = 95.0;
        assert!(bad.validate().is_err());

        bad = valid.clone();
        bad.radius_miles = -1.0;
        assert!(bad.validate().is_err());

        bad = valid;
        bad.longitude = f64::NAN;
        assert!(bad.validate().is_err());
    }
}
