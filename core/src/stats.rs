//! Derived ascent statistics
//!
//! Reduces the secondary source's per-style ascent counts into the figures
//! the front ends display. Derived values are computed on demand from the
//! breakdown they summarize and never stored alongside it.

use cragscout_types::{Climb, StyleBreakdown};

/// Figures derived from one style breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AscentStats {
    pub total_ascents: u32,
    /// Onsight share of all ascents, rounded to a whole percent
    pub onsight_rate_pct: u8,
}

/// Derive statistics from an optionally-absent breakdown.
///
/// No breakdown, or a breakdown with zero ascents, yields zeros - never a
/// division fault. Rounding is half-away-from-zero, applied once at the
/// percentage.
pub fn derive(style: Option<&StyleBreakdown>) -> AscentStats {
    let Some(style) = style else {
        return AscentStats::default();
    };
    let total = style.total();
    if total == 0 {
        return AscentStats::default();
    }
    let rate = (style.onsight as f64 / total as f64 * 100.0).round() as u8;
    AscentStats {
        total_ascents: total,
        onsight_rate_pct: rate,
    }
}

/// Convenience wrapper over a merged climb.
pub fn for_climb(climb: &Climb) -> AscentStats {
    derive(climb.secondary.style.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_all_styles_and_rounds_the_rate() {
        let style = StyleBreakdown {
            redpoint: 2,
            flash: 1,
            go: 0,
            top_rope: 0,
            onsight: 7,
        };
        let stats = derive(Some(&style));
        assert_eq!(stats.total_ascents, 10);
        assert_eq!(stats.onsight_rate_pct, 70);
    }

    #[test]
    fn absent_breakdown_yields_zeros() {
        assert_eq!(derive(None), AscentStats::default());
        let empty = StyleBreakdown::default();
        assert_eq!(derive(Some(&empty)), AscentStats::default());
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 1 of 8 = 12.5% -> 13
        let style = StyleBreakdown {
            redpoint: 7,
            onsight: 1,
            ..StyleBreakdown::default()
        };
        assert_eq!(derive(Some(&style)).onsight_rate_pct, 13);

        // 1 of 40 = 2.5% -> 3
        let style = StyleBreakdown {
            redpoint: 39,
            onsight: 1,
            ..StyleBreakdown::default()
        };
        assert_eq!(derive(Some(&style)).onsight_rate_pct, 3);
    }
}
