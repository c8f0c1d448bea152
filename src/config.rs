//! Runtime configuration.
//!
//! A [`ScrapeConfig`] is resolved once at startup from three layers, highest
//! priority first: command-line flags (or their environment variables), an
//! optional YAML file, and built-in defaults. The resolved value is then
//! passed by reference to every stage.

use crate::cli::Cli;
use crate::error::ScrapeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://www.index.hr/";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_GRID_ITEMS: usize = 4;

/// Shape of the optional YAML configuration file.
///
/// ```yaml
/// site_url: https://www.index.hr/
/// output_dir: /var/lib/sport-news
/// timeout_secs: 30
/// max_grid_items: 4
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub site_url: Option<String>,
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_grid_items: Option<usize>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ScrapeError> {
        serde_yaml::from_str(text).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ScrapeError> {
        let text = std::fs::read_to_string(path).map_err(|e| ScrapeError::io(path, e))?;
        Self::from_yaml(&text)
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Homepage whose navigation menu lists the categories.
    pub site_url: Url,
    pub output_dir: PathBuf,
    /// Deadline for a single request.
    pub timeout: Duration,
    pub max_grid_items: usize,
    /// Extract from saved snapshots only.
    pub offline: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            site_url: Url::parse(DEFAULT_SITE_URL).expect("default site url is valid"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_grid_items: DEFAULT_MAX_GRID_ITEMS,
            offline: false,
        }
    }
}

impl ScrapeConfig {
    /// Resolve the configuration from parsed CLI arguments, reading the YAML
    /// file they point at, if any.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub fn from_cli(cli: &Cli) -> Result<Self, ScrapeError> {
        let file = match cli.config.as_deref() {
            Some(path) => {
                let file = FileConfig::load(Path::new(path))?;
                info!(path, "Loaded configuration file");
                file
            }
            None => FileConfig::default(),
        };
        Self::layered(cli, file)
    }

    /// Merge CLI values over file values over defaults.
    pub fn layered(cli: &Cli, file: FileConfig) -> Result<Self, ScrapeError> {
        let site_url = cli
            .site_url
            .clone()
            .or(file.site_url)
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let site_url = parse_site_url(&site_url)?;

        let output_dir = cli
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ScrapeError::Config("timeout_secs must be positive".to_string()));
        }

        Ok(Self {
            site_url,
            output_dir: PathBuf::from(output_dir),
            timeout: Duration::from_secs(timeout_secs),
            max_grid_items: cli
                .max_grid_items
                .or(file.max_grid_items)
                .unwrap_or(DEFAULT_MAX_GRID_ITEMS),
            offline: cli.offline,
        })
    }

    /// Scheme, host and port of the site, without a trailing slash.
    ///
    /// This is the only prefix used to absolutize root-relative links.
    pub fn origin(&self) -> String {
        self.site_url.origin().ascii_serialization()
    }
}

fn parse_site_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw).map_err(|e| ScrapeError::Config(format!("site_url `{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScrapeError::Config(format!(
            "site_url `{raw}`: unsupported scheme `{other}`"
        ))),
    }
}
