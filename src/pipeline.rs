//! End-to-end run: homepage → categories → category pages → spreadsheets.
//!
//! Everything runs sequentially. A page that fails to download, a snapshot
//! that cannot be read or a file of one category that cannot be written only
//! drops that category. A failed write is followed by a check of the output
//! directory itself; if that check fails too, the run is aborted.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::fetch::FetchPage;
use crate::models::CategoryLink;
use crate::outputs::snapshots::{self, CategoryFiles, FileNamer};
use crate::outputs::xlsx;
use crate::scrapers::categories::CategoryExtractor;
use crate::scrapers::news::NewsExtractor;
use crate::utils::ensure_writable_dir;
use chrono::Local;
use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub categories_found: usize,
    pub pages_saved: usize,
    pub spreadsheets_written: usize,
    pub records_written: usize,
}

/// Run the whole pipeline with the given fetcher.
#[instrument(
    level = "info",
    skip_all,
    fields(site = %config.site_url, offline = config.offline)
)]
pub async fn run<F: FetchPage>(
    config: &ScrapeConfig,
    fetcher: &F,
) -> Result<RunSummary, ScrapeError> {
    let mut summary = RunSummary::default();

    let saved = if config.offline {
        let saved = snapshots::discover_saved(&config.output_dir).await?;
        summary.categories_found = saved.len();
        saved
    } else {
        let categories = discover_categories(config, fetcher).await?;
        summary.categories_found = categories.len();
        let saved = fetch_categories(config, fetcher, categories).await?;
        summary.pages_saved = saved.len();
        saved
    };

    let news = NewsExtractor::new(config)?;
    for (category, files) in &saved {
        let records = news.extract_from_file(&files.snapshot).await;
        match xlsx::write_news(&records, &files.spreadsheet) {
            Ok(true) => {
                summary.spreadsheets_written += 1;
                summary.records_written += records.len();
                info!(
                    category = %category.name,
                    path = %files.spreadsheet.display(),
                    count = records.len(),
                    "News saved"
                );
            }
            Ok(false) => {
                info!(
                    category = %category.name,
                    path = %files.snapshot.display(),
                    "No news found"
                );
            }
            Err(e) => {
                error!(category = %category.name, error = %e, "Skipping category spreadsheet");
                ensure_writable_dir(&config.output_dir).await?;
            }
        }
    }

    info!(?summary, "Run finished");
    Ok(summary)
}

/// Fetch the homepage, save a timestamped snapshot and read the menu from it.
///
/// A failed homepage fetch is logged and yields no categories.
#[instrument(level = "info", skip_all, fields(url = %config.site_url))]
async fn discover_categories<F: FetchPage>(
    config: &ScrapeConfig,
    fetcher: &F,
) -> Result<Vec<CategoryLink>, ScrapeError> {
    info!("Fetching homepage");
    let html = match fetcher.fetch(config.site_url.as_str()).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Error fetching homepage");
            return Ok(Vec::new());
        }
    };

    let path = snapshots::homepage_path(&config.output_dir, Local::now());
    snapshots::save(&path, &html).await?;

    let categories = CategoryExtractor::new(config)?.extract_from_file(&path).await;
    if categories.is_empty() {
        info!("No sports categories found");
    }
    for category in &categories {
        info!(name = %category.name, url = %category.url, "Sports category found");
    }
    Ok(categories)
}

/// Download every category page in order and save it next to the outputs.
///
/// Returns the files assigned to each category that was saved. Failed
/// downloads and failed snapshot writes are logged and left out.
#[instrument(level = "info", skip_all, fields(count = categories.len()))]
async fn fetch_categories<F: FetchPage>(
    config: &ScrapeConfig,
    fetcher: &F,
    categories: Vec<CategoryLink>,
) -> Result<Vec<(CategoryLink, CategoryFiles)>, ScrapeError> {
    let fetched: Vec<(CategoryLink, Option<String>)> = stream::iter(categories)
        .then(|category| async move {
            info!(name = %category.name, url = %category.url, "Fetching category");
            match fetcher.fetch(&category.url).await {
                Ok(html) => (category, Some(html)),
                Err(e) => {
                    error!(name = %category.name, error = %e, "Error fetching category");
                    (category, None)
                }
            }
        })
        .collect()
        .await;

    let mut namer = FileNamer::default();
    let mut saved = Vec::with_capacity(fetched.len());
    for (category, html) in fetched {
        let Some(html) = html else { continue };
        let files = namer.files_for(&config.output_dir, &category);
        if let Err(e) = snapshots::save(&files.snapshot, &html).await {
            error!(name = %category.name, error = %e, "Skipping category snapshot");
            ensure_writable_dir(&config.output_dir).await?;
            continue;
        }
        saved.push((category, files));
    }
    Ok(saved)
}
