//! Primary source adapter
//!
//! Maps the structured area page into the canonical model: area text plus
//! one climb per route row with the primary bundle populated. Rows without
//! a name are dropped (the name is the secondary join key and must be
//! non-empty).

use cragscout_types::{Area, Climb, Discipline, PhotoRef, PrimaryInfo};

use super::{AreaData, GuidePages, PrimaryFetch, SourceError};

pub struct PrimaryAdapter<G> {
    guide: G,
}

impl<G: GuidePages> PrimaryAdapter<G> {
    pub fn new(guide: G) -> Self {
        Self { guide }
    }
}

impl<G: GuidePages> PrimaryFetch for PrimaryAdapter<G> {
    async fn fetch_area(&self, area: &Area) -> Result<AreaData, SourceError> {
        let doc = self.guide.area_page(&area.link).await?;

        let mut climbs = Vec::with_capacity(doc.routes.len());
        for row in doc.routes {
            let name = row.name.trim();
            if name.is_empty() {
                tracing::warn!(area = %area.name, "dropping route row with empty name");
                continue;
            }
            let discipline = row
                .discipline
                .as_deref()
                .map(Discipline::from_tag)
                .unwrap_or_default();
            let mut climb = Climb::new(name, discipline);
            climb.primary = PrimaryInfo {
                stars: row.stars,
                rating_count: row.rating_count,
                grade: row.grade,
                descriptions: row.descriptions,
                comments: row.comments,
                photos: row
                    .photo_urls
                    .iter()
                    .map(|url| PhotoRef::for_climb(name, url))
                    .collect(),
            };
            climbs.push(climb);
        }

        Ok(AreaData {
            descriptions: doc.descriptions,
            comments: doc.comments,
            climbs,
        })
    }
}
