//! HTML extraction for the news portal.
//!
//! Extraction happens in two stages, each backed by a struct that parses its
//! CSS selectors once at construction:
//!
//! 1. **Categories**: [`categories::CategoryExtractor`] reads the homepage
//!    navigation menu and yields one [`CategoryLink`](crate::models::CategoryLink)
//!    per sport section
//! 2. **News**: [`news::NewsExtractor`] reads a category page and yields the
//!    featured card followed by the first grid cards
//!
//! # Markup
//!
//! | Stage | Selector |
//! |-------|----------|
//! | Menu entries | `ul.scroll-menu li.scroll-menu-item a.sport-text-hover` |
//! | Featured card | `div.first-news-holder.vertical a` |
//! | Grid cards | `div.grid-item a` |
//!
//! Both extractors accept either a parsed [`scraper::Html`] or the path of a
//! saved snapshot. An unreadable snapshot is logged and treated as an empty
//! page rather than an error.
//!
//! Links are made absolute by [`urls::absolutize`].

pub mod categories;
pub mod news;
pub mod urls;

use crate::error::ScrapeError;
use scraper::Selector;
use std::path::Path;
use tracing::error;

pub(crate) fn parse_selector(selector: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector,
        reason: e.to_string(),
    })
}

/// Read a saved snapshot, logging and returning `None` when it is unavailable.
pub(crate) async fn read_snapshot(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Some(html),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Snapshot file could not be read");
            None
        }
    }
}
