//! Saved-climb persistence
//!
//! The engine's outbound boundary toward durable storage. A saved climb
//! carries a freshly minted id, the owning area's id, and the full merged
//! record - including a complete five-way style breakdown with zeros
//! substituted when the secondary source reported none, so downstream
//! consumers never see a partial breakdown.

mod error;

pub use error::StorageError;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use cragscout_types::{Area, Climb, StyleBreakdown};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

/// Identifier minted once per saved climb.
///
/// Millisecond timestamp shifted left 12 bits, plus a process-local
/// sequence number: time-ordered and collision-free under rapid saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClimbId(pub u64);

impl ClimbId {
    pub fn mint() -> Self {
        static SEQUENCE: AtomicU64 = AtomicU64::new(0);
        let millis = Utc::now().timestamp_millis() as u64;
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xFFF;
        Self((millis << 12) | seq)
    }
}

/// One durably saved climb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedClimbRecord {
    pub climb_id: ClimbId,
    pub area_id: u64,
    /// RFC 3339 save time
    pub saved_at: String,
    pub climb: Climb,
    /// Always all five counts; zeros when the breakdown was absent
    pub style: StyleBreakdown,
}

impl SavedClimbRecord {
    pub fn new(area: &Area, climb: &Climb) -> Self {
        Self {
            climb_id: ClimbId::mint(),
            area_id: area.id,
            saved_at: Utc::now().to_rfc3339(),
            climb: climb.clone(),
            style: climb.secondary.style.unwrap_or_default(),
        }
    }
}

/// Append-only JSON-lines store of saved climbs.
#[derive(Debug, Clone)]
pub struct SavedClimbStore {
    path: PathBuf,
}

impl SavedClimbStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn append(&self, record: &SavedClimbRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        let mut line = serde_json::to_string(record).map_err(StorageError::Encode)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }

    /// Every record ever saved, in save order. A missing file is an empty
    /// store, not an error.
    pub async fn load_all(&self) -> Result<Vec<SavedClimbRecord>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|source| StorageError::Decode {
                    path: self.path.clone(),
                    source,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cragscout_types::{Discipline, SecondaryInfo};
    use hashbrown::HashSet;

    fn area() -> Area {
        Area {
            id: 9,
            name: "El Rio".into(),
            ..Area::default()
        }
    }

    #[test]
    fn minted_ids_are_unique_under_rapid_saves() {
        let ids: HashSet<ClimbId> = (0..1_000).map(|_| ClimbId::mint()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn absent_breakdown_is_saved_as_zeros() {
        let climb = Climb::new("Moonbeam", Discipline::Sport);
        let record = SavedClimbRecord::new(&area(), &climb);
        assert_eq!(record.area_id, 9);
        assert_eq!(record.style, StyleBreakdown::default());
        assert_eq!(record.style.counts(), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn present_breakdown_is_carried_whole() {
        let mut climb = Climb::new("Moonbeam", Discipline::Sport);
        climb.secondary = SecondaryInfo {
            style: Some(StyleBreakdown {
                redpoint: 2,
                flash: 1,
                go: 0,
                top_rope: 0,
                onsight: 7,
            }),
            ..SecondaryInfo::default()
        };
        let record = SavedClimbRecord::new(&area(), &climb);
        assert_eq!(record.style.counts(), [2, 1, 0, 0, 7]);
    }

    #[tokio::test]
    async fn append_then_load_roundtrips() {
        let path = std::env::temp_dir()
            .join("cragscout-tests")
            .join(format!("saved-{}.jsonl", ClimbId::mint().0));
        let store = SavedClimbStore::new(&path);

        let climb = Climb::new("Moonbeam", Discipline::Sport);
        let first = SavedClimbRecord::new(&area(), &climb);
        let second = SavedClimbRecord::new(&area(), &climb);
        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, vec![first, second]);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_store() {
        let store = SavedClimbStore::new(std::env::temp_dir().join("cragscout-never-written.jsonl"));
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
