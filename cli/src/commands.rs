use std::sync::Arc;

use cragscout_core::source::fs::{FileCatalog, FileGuide};
use cragscout_core::{
    Aggregator, AppConfigExt, AreaIndex, PrimaryAdapter, SearchParams, SecondaryAdapter,
    SecondaryPacing, SavedClimbRecord, SavedClimbStore, bounding_box, grades, stats,
};

use crate::CliContext;

pub async fn load_index(ctx: &CliContext, path: &str) {
    match AreaIndex::load(std::path::Path::new(path)).await {
        Ok(index) => {
            println!("Loaded {} areas from {}", index.len(), path);
            ctx.state.write().await.index = Some(index);
        }
        Err(err) => println!("{err}"),
    }
}

pub async fn search(ctx: &CliContext, params: SearchParams) {
    if let Err(reason) = params.validate() {
        println!("Invalid search: {reason}");
        return;
    }

    let (config, areas) = {
        let s = ctx.state.read().await;
        let Some(index) = &s.index else {
            println!("No area index loaded; run `load --path <areas.json>` first");
            return;
        };
        let rect = match bounding_box(params.latitude, params.longitude, params.radius_miles) {
            Ok(rect) => rect,
            Err(err) => {
                println!("{err}");
                return;
            }
        };
        (s.config.clone(), index.find_in_box(&rect))
    };

    if areas.is_empty() {
        println!("No areas within {} miles", params.radius_miles);
        return;
    }
    println!("Found {} areas, scraping both sources...", areas.len());

    let root = config.resolved_data_dir();
    let pacing = SecondaryPacing::from_config(&config);
    let primary = PrimaryAdapter::new(FileGuide::new(root.clone()));
    let open_session = {
        let root = root.clone();
        let pacing = pacing.clone();
        move || SecondaryAdapter::new(FileCatalog::new(root.clone()), pacing.clone())
    };
    let aggregator = Aggregator::new(
        primary,
        open_session,
        Arc::clone(&ctx.store),
        config.max_parallel_areas,
    );
    let mut outcome = aggregator.run(areas).await;

    // Presentation-side discipline filter over the CLI's own copy
    if let Some(discipline) = params.discipline {
        for result in &mut outcome.results {
            result.area.climbs.retain(|c| c.discipline == discipline);
            result.climb_cursor = 0;
        }
        outcome.results.retain(|r| !r.area.climbs.is_empty());
    }

    if outcome.failures.is_empty() {
        println!("Aggregated {} of {} areas", outcome.results.len(), outcome.discovered);
    } else {
        println!(
            "Aggregated {} of {} areas; failed: {}",
            outcome.results.len(),
            outcome.discovered,
            outcome
                .failures
                .iter()
                .map(|f| f.area_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut s = ctx.state.write().await;
    s.last_discovered = outcome.discovered;
    s.last_failed_areas = outcome.failures.into_iter().map(|f| f.area_name).collect();
    s.area_cursor = 0;
    s.results = outcome.results;
    if s.results.is_empty() {
        println!("No results found");
    }
}

pub async fn show(ctx: &CliContext) {
    let s = ctx.state.read().await;
    let Some(result) = s.results.get(s.area_cursor) else {
        if s.last_discovered > 0 {
            println!(
                "No results to show (last search discovered {} areas; failed: {})",
                s.last_discovered,
                s.last_failed_areas.join(", ")
            );
        } else {
            println!("No results to show");
        }
        return;
    };
    let area = &result.area;
    println!(
        "Area {}/{}: {} [{}] ({:.4}, {:.4})",
        s.area_cursor + 1,
        s.results.len(),
        area.name,
        area.state,
        area.latitude,
        area.longitude
    );
    println!(
        "  {} descriptions, {} comments",
        area.descriptions.len(),
        area.comments.len()
    );

    let Some(climb) = result.current_climb() else {
        println!("  (area lists no climbs)");
        return;
    };
    let derived = stats::for_climb(climb);
    let catalog_grade = grades::to_yds(climb.secondary.grade.as_deref(), climb.discipline);

    println!(
        "Climb {}/{}: {}",
        result.climb_cursor + 1,
        area.climbs.len(),
        climb.name
    );
    println!("  Type: {}", climb.discipline.label());
    println!(
        "  Grade: {}",
        climb.primary.grade.as_deref().unwrap_or("unknown")
    );
    match climb.secondary.grade.as_deref() {
        Some(code) => println!("  Catalog grade: {catalog_grade} ({code})"),
        None => println!("  Catalog grade: {catalog_grade}"),
    }
    if let Some(stars) = climb.primary.stars {
        println!(
            "  Rating: {stars:.1}/5 ({} votes)",
            climb.primary.rating_count.unwrap_or(0)
        );
    }
    if let Some(stars) = climb.secondary.stars {
        println!(
            "  Catalog rating: {stars:.1}/5, {} recommends",
            climb.secondary.recommends.unwrap_or(0)
        );
    }
    println!(
        "  Ascents: {}  Onsight rate: {}%",
        derived.total_ascents, derived.onsight_rate_pct
    );
    println!(
        "  Photos: {}",
        climb.primary.photos.len() + climb.secondary.photos.len()
    );
}

pub async fn step_area(ctx: &CliContext, step: i64) {
    let mut s = ctx.state.write().await;
    if s.results.is_empty() {
        println!("No results to navigate");
        return;
    }
    let target = s.area_cursor as i64 + step;
    if target >= 0 && (target as usize) < s.results.len() {
        s.area_cursor = target as usize;
        drop(s);
        show(ctx).await;
    } else {
        println!("No more areas in that direction");
    }
}

pub async fn step_climb(ctx: &CliContext, step: i64) {
    let mut s = ctx.state.write().await;
    let cursor = s.area_cursor;
    let Some(result) = s.results.get_mut(cursor) else {
        println!("No results to navigate");
        return;
    };
    if result.step_climb(step) {
        drop(s);
        show(ctx).await;
    } else {
        println!("No more climbs in that direction");
    }
}

pub async fn save(ctx: &CliContext) {
    let (record, path) = {
        let s = ctx.state.read().await;
        let Some(result) = s.results.get(s.area_cursor) else {
            println!("No result selected");
            return;
        };
        let Some(climb) = result.current_climb() else {
            println!("No climb selected");
            return;
        };
        (
            SavedClimbRecord::new(&result.area, climb),
            s.config.resolved_data_dir().join("saved_climbs.jsonl"),
        )
    };
    let store = SavedClimbStore::new(path);
    match store.append(&record).await {
        Ok(()) => println!("Saved {} (id {})", record.climb.name, record.climb_id.0),
        Err(err) => println!("{err}"),
    }
}

pub async fn list_saved(ctx: &CliContext) {
    let path = {
        let s = ctx.state.read().await;
        s.config.resolved_data_dir().join("saved_climbs.jsonl")
    };
    let store = SavedClimbStore::new(path);
    let records = match store.load_all().await {
        Ok(records) => records,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    if records.is_empty() {
        println!("No saved climbs");
        return;
    }
    for record in &records {
        let when = chrono::DateTime::parse_from_rfc3339(&record.saved_at)
            .map(|dt| dt.format("%m/%d/%Y %H:%M").to_string())
            .unwrap_or_else(|_| record.saved_at.clone());
        println!(
            "{} - {} (id {})",
            record.climb.name, when, record.climb_id.0
        );
    }
    println!("\nTotal: {} climbs", records.len());
}

pub async fn show_config(ctx: &CliContext) {
    let s = ctx.state.read().await;
    println!("Data directory:  {}", s.config.resolved_data_dir().display());
    println!("Image directory: {}", s.config.resolved_image_dir().display());
    println!(
        "Secondary pacing: {}-{} ms, page timeout {} s",
        s.config.secondary_delay_min_ms,
        s.config.secondary_delay_max_ms,
        s.config.page_timeout_secs
    );
    println!("Worker cap: {}", s.config.max_parallel_areas);
}
