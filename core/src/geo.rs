//! Geospatial bounding-box helpers
//!
//! Converts a center point plus a great-circle radius into an axis-aligned
//! lat/lon rectangle the area index can query with a plain range predicate.
//! The rectangle is an approximation, not a circle: it over-includes near
//! the poles and callers must not rely on boundary exactness.

use thiserror::Error;

/// Mean Earth radius in miles
const EARTH_RADIUS_MI: f64 = 3958.8;

/// Errors from bounding-box construction
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("invalid search input: {reason}")]
    InvalidInput { reason: &'static str },
}

/// Axis-aligned lat/lon rectangle. Latitude bounds stay inside [-90, 90],
/// longitude bounds inside [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Range predicate used by the area index.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }
}

/// Compute the bounding box for a radius search around a point.
///
/// Longitude degrees shrink by cos(latitude), so the longitude delta is
/// scaled by its inverse. At latitude ±90 the cosine vanishes and the
/// longitude span degenerates to the full [-180, 180] clamp range rather
/// than erroring.
pub fn bounding_box(
    latitude: f64,
    longitude: f64,
    radius_miles: f64,
) -> Result<BoundingBox, GeoError> {
    if !(radius_miles >= 0.0) {
        return Err(GeoError::InvalidInput {
            reason: "radius must be non-negative",
        });
    }

    // Miles to angular distance in radians, then to degrees
    let deg_dist = (radius_miles / EARTH_RADIUS_MI).to_degrees();

    let min_lat = (latitude - deg_dist).max(-90.0);
    let max_lat = (latitude + deg_dist).min(90.0);

    let delta_lon = deg_dist / latitude.to_radians().cos();
    let min_lon = (longitude - delta_lon).max(-180.0);
    let max_lon = (longitude + delta_lon).min(180.0);

    Ok(BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    })
}
