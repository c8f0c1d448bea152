//! # Index Sport News
//!
//! Discovers the sport sections of a news portal from its homepage menu,
//! downloads every section page and exports the latest news of each section
//! to a spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! index_sport_news -o ./data
//! ```
//!
//! ## Architecture
//!
//! The application runs one sequential pipeline:
//! 1. **Discovery**: Fetch the homepage, snapshot it, read the sport menu
//! 2. **Fetching**: Download and snapshot every category page
//! 3. **Extraction**: Read the featured and grid news cards of each snapshot
//! 4. **Output**: Write one `.xlsx` file per category that has news
//!
//! Failures of a single page are logged and skipped; only problems with the
//! output directory end the run with a non-zero status.

use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::ScrapeConfig;
use fetch::HttpFetcher;
use outputs::LOG_FILE_NAME;
use utils::ensure_writable_dir;

/// Open (truncating) the run log inside `output_dir`, creating the directory.
fn open_log_file(output_dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(output_dir)?;
    File::create(output_dir.join(LOG_FILE_NAME))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let config = ScrapeConfig::from_cli(&args);

    // --- Tracing init: console always, log file when the directory is usable ---
    let log_file = config
        .as_ref()
        .ok()
        .map(|config| open_log_file(&config.output_dir));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = match &log_file {
        Some(Ok(file)) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(Mutex::new(file.try_clone()?)),
        ),
        _ => None,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .with_timer(fmt::time::UtcTime::rfc_3339()),
        )
        .with(file_layer)
        .init();

    let start_time = std::time::Instant::now();
    info!("index_sport_news starting up");

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    debug!(?config, "Resolved configuration");

    if let Some(Err(e)) = log_file {
        error!(path = %config.output_dir.display(), error = %e, "Cannot create output directory");
        return Err(e.into());
    }
    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let fetcher = HttpFetcher::new(&config)?;
    let summary = match pipeline::run(&config, &fetcher).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Run aborted");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        categories = summary.categories_found,
        spreadsheets = summary.spreadsheets_written,
        records = summary.records_written,
        "Execution complete"
    );

    Ok(())
}
