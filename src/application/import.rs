use crate::domain::error::Result;
use crate::domain::model::{MenuRecord, RestaurantRecord};
use crate::infrastructure::storage::db::SqliteRepository;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const BATCH_SIZE: usize = 100;

/// Import file layout: `{ "restaurants": [...], "menus": [...] }`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub restaurants: Vec<RestaurantRecord>,
    #[serde(default)]
    pub menus: Vec<MenuRecord>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub restaurants: usize,
    pub menus: usize,
}

pub async fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

fn progress_bar(total: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Upsert every restaurant and menu in `dataset`, in batches.
pub async fn import_dataset(
    repository: &SqliteRepository,
    dataset: Dataset,
    show_progress: bool,
) -> Result<ImportSummary> {
    let Dataset { restaurants, menus } = dataset;
    let pb = progress_bar(restaurants.len() + menus.len(), show_progress);
    let mut summary = ImportSummary::default();

    pb.set_message("restaurants");
    for batch in restaurants.chunks(BATCH_SIZE) {
        summary.restaurants += repository.insert_restaurants(batch.to_vec()).await?;
        pb.inc(batch.len() as u64);
    }

    pb.set_message("menus");
    for batch in menus.chunks(BATCH_SIZE) {
        summary.menus += repository.insert_menus(batch.to_vec()).await?;
        pb.inc(batch.len() as u64);
    }

    pb.finish_with_message("Imported");
    info!(
        restaurants = summary.restaurants,
        menus = summary.menus,
        "dataset imported"
    );

    Ok(summary)
}

pub async fn import_file(repository: &SqliteRepository, path: &Path) -> Result<ImportSummary> {
    let dataset = load_dataset(path).await?;
    import_dataset(repository, dataset, true).await
}
