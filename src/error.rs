//! Error taxonomy for the scraping pipeline.
//!
//! Most variants are recoverable at the stage that produces them: a failed
//! fetch skips one page, an unreadable snapshot yields an empty result. Only
//! errors touching the output directory itself are allowed to reach `main`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure: connection refused, DNS, timeout, body decoding.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write spreadsheet {}: {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}
