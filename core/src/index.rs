//! Area discovery index
//!
//! In-memory store of known areas, queried with the geo bounding box.
//! Ids are assigned sequentially when an area is first inserted and never
//! reused, so every discovery pass hands the coordinator areas with stable,
//! unique identities. Snapshots load from JSON seed files.

use std::path::{Path, PathBuf};

use cragscout_types::Area;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::BoundingBox;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read area index {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode area index {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A known area before discovery assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeed {
    pub name: String,
    #[serde(default)]
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub link: String,
}

#[derive(Debug, Default)]
pub struct AreaIndex {
    areas: Vec<Area>,
    by_id: HashMap<u64, usize>,
    next_id: u64,
}

impl AreaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a seed, assigning the next sequential id. Returns the id.
    pub fn insert(&mut self, seed: AreaSeed) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.by_id.insert(id, self.areas.len());
        self.areas.push(Area {
            id,
            name: seed.name,
            state: seed.state,
            latitude: seed.latitude,
            longitude: seed.longitude,
            link: seed.link,
            ..Area::default()
        });
        id
    }

    pub fn get(&self, id: u64) -> Option<&Area> {
        self.by_id.get(&id).map(|&slot| &self.areas[slot])
    }

    /// All areas whose coordinates fall inside `rect`, as fresh copies the
    /// coordinator can own exclusively.
    pub fn find_in_box(&self, rect: &BoundingBox) -> Vec<Area> {
        self.areas
            .iter()
            .filter(|area| rect.contains(area.latitude, area.longitude))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Load a seed file: a JSON array of [`AreaSeed`] records.
    pub async fn load(path: &Path) -> Result<Self, IndexError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IndexError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let seeds: Vec<AreaSeed> =
            serde_json::from_str(&raw).map_err(|source| IndexError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        let mut index = Self::new();
        for seed in seeds {
            index.insert(seed);
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::bounding_box;

    fn seed(name: &str, lat: f64, lon: f64) -> AreaSeed {
        AreaSeed {
            name: name.into(),
            state: "california".into(),
            latitude: lat,
            longitude: lon,
            link: format!("area/{name}"),
        }
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let mut index = AreaIndex::new();
        let a = index.insert(seed("A", 37.0, -119.0));
        let b = index.insert(seed("B", 38.0, -120.0));
        assert_eq!((a, b), (0, 1));
        assert_eq!(index.get(0).unwrap().name, "A");
        assert_eq!(index.get(1).unwrap().name, "B");
        assert!(index.get(2).is_none());
    }

    #[test]
    fn find_in_box_applies_the_range_predicate() {
        let mut index = AreaIndex::new();
        index.insert(seed("Near", 37.1, -119.1));
        index.insert(seed("Far north", 44.0, -119.1));
        index.insert(seed("Far west", 37.1, -130.0));

        let rect = bounding_box(37.0, -119.0, 60.0).unwrap();
        let hits = index.find_in_box(&rect);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Near");
    }

    #[test]
    fn loads_seed_json() {
        let raw = r#"[
            {"name": "El Rio", "state": "california",
             "latitude": 37.2, "longitude": -119.2, "link": "area/el-rio"}
        ]"#;
        let seeds: Vec<AreaSeed> = serde_json::from_str(raw).unwrap();
        let mut index = AreaIndex::new();
        for s in seeds {
            index.insert(s);
        }
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(0).unwrap().link, "area/el-rio");
    }
}
