//! Utility functions for text cleanup, log formatting and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization for text pulled out of markup
//! - String truncation for logging long values
//! - File system validation for the output directory

use crate::error::ScrapeError;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse every run of whitespace into a single space and trim the ends.
///
/// Text collected from nested markup keeps the indentation and newlines of
/// the source document; this turns it into a single clean line.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("\n  Match\n   Recap  "), "Match Recap");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns [`ScrapeError::Io`] if the directory cannot be created or written to.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), ScrapeError> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| ScrapeError::io(path, e))?;

    let scratch_path = path.join("..__write_check__");
    fs::write(&scratch_path, b"")
        .await
        .map_err(|e| ScrapeError::io(&scratch_path, e))?;
    let _ = fs::remove_file(&scratch_path).await;

    info!("Output directory is writable");
    Ok(())
}
