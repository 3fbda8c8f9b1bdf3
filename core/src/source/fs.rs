//! File-backed transports
//!
//! Offline snapshots of already-scraped pages, used by the CLI and the
//! integration tests. An area page lives at `<root>/areas/<slug>.json`, a
//! catalog page at `<root>/catalog/<slug>.json`; a missing catalog file is
//! a no-match, a missing area file is a source failure (the primary source
//! is required).

use std::path::{Path, PathBuf};

use super::{AreaDocument, CatalogHit, CatalogPage, CatalogSession, GuidePages, SourceError};

/// Filesystem-safe slug for an area link or climb name: lower-cased,
/// runs of non-alphanumerics collapsed to single dashes.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut dash_pending = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if dash_pending && !out.is_empty() {
                out.push('-');
            }
            dash_pending = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            dash_pending = true;
        }
    }
    out
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::ReadSnapshot {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| SourceError::DecodeSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Primary
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileGuide {
    root: PathBuf,
}

impl FileGuide {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl GuidePages for FileGuide {
    async fn area_page(&self, link: &str) -> Result<AreaDocument, SourceError> {
        let path = self.root.join("areas").join(format!("{}.json", slug(link)));
        read_json(&path).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Secondary
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileCatalog {
    root: PathBuf,
    pending: Option<PathBuf>,
}

impl FileCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pending: None,
        }
    }
}

impl CatalogSession for FileCatalog {
    async fn submit(&mut self, name: &str) -> Result<(), SourceError> {
        self.pending = Some(
            self.root
                .join("catalog")
                .join(format!("{}.json", slug(name))),
        );
        Ok(())
    }

    async fn try_fetch(&mut self) -> Result<Option<CatalogHit>, SourceError> {
        let Some(path) = self.pending.clone() else {
            return Err(SourceError::Unavailable {
                reason: "no search submitted".into(),
            });
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let page: CatalogPage =
                    serde_json::from_str(&raw).map_err(|source| SourceError::DecodeSnapshot {
                        path,
                        source,
                    })?;
                Ok(Some(CatalogHit::Match(page)))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Some(CatalogHit::NoMatch))
            }
            Err(source) => Err(SourceError::ReadSnapshot { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_collapse_punctuation_and_case() {
        assert_eq!(slug("Moonbeam Direct"), "moonbeam-direct");
        assert_eq!(slug("https://guide.example.com/area/42/El-Rio"), "https-guide-example-com-area-42-el-rio");
        assert_eq!(slug("  Snake's  Den!  "), "snake-s-den");
    }

    #[tokio::test]
    async fn missing_catalog_snapshot_is_a_no_match() {
        let mut catalog = FileCatalog::new(std::env::temp_dir().join("cragscout-no-such-dir"));
        catalog.submit("Ghost Route").await.unwrap();
        assert_eq!(catalog.try_fetch().await.unwrap(), Some(CatalogHit::NoMatch));
    }

    #[tokio::test]
    async fn missing_area_snapshot_is_a_failure() {
        let guide = FileGuide::new(std::env::temp_dir().join("cragscout-no-such-dir"));
        assert!(matches!(
            guide.area_page("nowhere").await,
            Err(SourceError::ReadSnapshot { .. })
        ));
    }
}
