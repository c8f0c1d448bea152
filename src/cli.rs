//! Command-line interface definitions for Index Sport News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also come from an environment variable or the YAML file
//! passed with `--config`; see [`crate::config`] for how they are layered.

use clap::Parser;

/// Command-line arguments for the Index Sport News application.
///
/// # Examples
///
/// ```sh
/// # Scrape index.hr into ./data
/// index_sport_news
///
/// # Different output directory and a shorter deadline
/// index_sport_news -o /tmp/sport --timeout-secs 20
///
/// # Re-extract news from snapshots saved by an earlier run
/// index_sport_news -o /tmp/sport --offline
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Homepage of the news portal
    #[arg(long, env = "SITE_URL")]
    pub site_url: Option<String>,

    /// Directory for HTML snapshots, spreadsheets and the log file
    #[arg(short, long, env = "OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Maximum number of grid news items taken from each category page
    #[arg(long, env = "MAX_GRID_ITEMS")]
    pub max_grid_items: Option<usize>,

    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Skip fetching and extract news from snapshots already in the output directory
    #[arg(long)]
    pub offline: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_are_unset() {
        let cli = Cli::parse_from(["index_sport_news"]);

        assert!(cli.site_url.is_none());
        assert!(cli.output_dir.is_none());
        assert!(cli.timeout_secs.is_none());
        assert!(cli.max_grid_items.is_none());
        assert!(!cli.offline);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "index_sport_news",
            "-o",
            "/tmp/sport",
            "-c",
            "/etc/sport.yaml",
        ]);

        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/sport"));
        assert_eq!(cli.config.as_deref(), Some("/etc/sport.yaml"));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "index_sport_news",
            "--site-url",
            "https://example.org/",
            "--timeout-secs",
            "15",
            "--max-grid-items",
            "2",
            "--offline",
        ]);

        assert_eq!(cli.site_url.as_deref(), Some("https://example.org/"));
        assert_eq!(cli.timeout_secs, Some(15));
        assert_eq!(cli.max_grid_items, Some(2));
        assert!(cli.offline);
    }
}
