//! Grade normalization between the two source vocabularies
//!
//! The secondary source reports French route grades and Font boulder
//! grades; the primary source speaks YDS and the V-scale. Normalization is
//! a pure table lookup keyed by the first two characters of the code,
//! lower-cased (shorter codes use their full lower-cased value), with the
//! table chosen by discipline. Grade data from the secondary source is
//! known to be incomplete, so a miss resolves to a sentinel and never
//! aborts aggregation.

use std::fmt;

use cragscout_types::Discipline;
use phf::phf_map;

/// French route grades to YDS
static ROUTE_GRADES: phf::Map<&'static str, &'static str> = phf_map! {
    "3" => "5.5",
    "4a" => "5.6",
    "4b" => "5.7",
    "4c" => "5.8",
    "5a" => "5.9",
    "5c" => "5.10a",
    "6a" => "5.10b",
    "6a+" => "5.10c",
    "6b" => "5.10d",
    "6b+" => "5.11a",
    "6c" => "5.11b",
    "6c+" => "5.11c",
    "7a" => "5.11d",
    "7a+" => "5.12a",
    "7b" => "5.12b",
    "7b+" => "5.12c",
    "7c" => "5.12d",
    "7c+" => "5.13a",
    "8a" => "5.13b",
    "8a+" => "5.13c",
    "8b" => "5.13d",
    "8b+" => "5.14a",
    "8c" => "5.14b",
    "8c+" => "5.14c",
    "9a" => "5.14d",
    "9a+" => "5.15a",
    "9b" => "5.15b",
    "9b+" => "5.15c",
    "9c" => "5.15d",
};

/// Font boulder grades to the V-scale
static BOULDER_GRADES: phf::Map<&'static str, &'static str> = phf_map! {
    "4" => "V0-",
    "4+" => "V0",
    "5" => "V0+",
    "5+" => "V1",
    "6a" => "V2",
    "6a+" => "V3",
    "6b" => "V3",
    "6b+" => "V4",
    "6c" => "V5",
    "6c+" => "V5+",
    "7a" => "V6",
    "7a+" => "V7",
    "7b" => "V8",
    "7b+" => "V9",
    "7c" => "V10",
    "7c+" => "V11",
    "8a" => "V12",
    "8a+" => "V13",
    "8b" => "V14",
    "8b+" => "V15",
    "8c" => "V16",
    "8c+" => "V17",
    "9a" => "V17+",
};

/// Outcome of normalizing a secondary grade code.
///
/// `NoGrade` (the source reported nothing) and `Unknown` (no table entry
/// for the code or discipline) are distinct variants so callers and tests
/// can tell them apart; both display as "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedGrade {
    Mapped(&'static str),
    NoGrade,
    Unknown,
}

impl NormalizedGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedGrade::Mapped(grade) => grade,
            NormalizedGrade::NoGrade | NormalizedGrade::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NormalizedGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a secondary-source grade code into the primary vocabulary.
///
/// Codes longer than two characters collapse onto their two-character
/// prefix ("6a+" looks up "6a"), matching the reference mapping rule.
pub fn to_yds(code: Option<&str>, discipline: Discipline) -> NormalizedGrade {
    let Some(code) = code else {
        return NormalizedGrade::NoGrade;
    };

    let key: String = code.chars().take(2).collect::<String>().to_lowercase();

    let table = if discipline.uses_route_grades() {
        &ROUTE_GRADES
    } else if discipline == Discipline::Boulder {
        &BOULDER_GRADES
    } else {
        return NormalizedGrade::Unknown;
    };

    table
        .get(key.as_str())
        .copied()
        .map(NormalizedGrade::Mapped)
        .unwrap_or(NormalizedGrade::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_codes_map_through_the_route_table() {
        assert_eq!(
            to_yds(Some("6a+"), Discipline::Sport),
            NormalizedGrade::Mapped("5.10b")
        );
        assert_eq!(
            to_yds(Some("7c"), Discipline::Trad),
            NormalizedGrade::Mapped("5.12d")
        );
        assert_eq!(
            to_yds(Some("3"), Discipline::TopRope),
            NormalizedGrade::Mapped("5.5")
        );
    }

    #[test]
    fn boulder_codes_map_through_the_boulder_table() {
        assert_eq!(
            to_yds(Some("8a"), Discipline::Boulder),
            NormalizedGrade::Mapped("V12")
        );
        assert_eq!(
            to_yds(Some("6c"), Discipline::Boulder),
            NormalizedGrade::Mapped("V5")
        );
    }

    #[test]
    fn absent_code_is_distinct_from_mapping_miss() {
        let no_grade = to_yds(None, Discipline::Sport);
        let miss = to_yds(Some("zz"), Discipline::Sport);
        assert_eq!(no_grade, NormalizedGrade::NoGrade);
        assert_eq!(miss, NormalizedGrade::Unknown);
        assert_ne!(no_grade, miss);
        // Both collapse to the same display string
        assert_eq!(no_grade.to_string(), "unknown");
        assert_eq!(miss.to_string(), "unknown");
    }

    #[test]
    fn unknown_discipline_never_maps() {
        assert_eq!(
            to_yds(Some("6a"), Discipline::Unknown),
            NormalizedGrade::Unknown
        );
    }

    #[test]
    fn lookup_truncates_to_two_characters() {
        // Suffixed codes collapse onto their two-character prefix, so a
        // "+" never reaches the table
        assert_eq!(
            to_yds(Some("9a+"), Discipline::Sport),
            NormalizedGrade::Mapped("5.14d")
        );
        assert_eq!(
            to_yds(Some("6A+"), Discipline::Boulder),
            NormalizedGrade::Mapped("V2")
        );
    }

    #[test]
    fn normalization_is_pure() {
        let first = to_yds(Some("7b+"), Discipline::Sport);
        let second = to_yds(Some("7b+"), Discipline::Sport);
        assert_eq!(first, second);
    }
}
