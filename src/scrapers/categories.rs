//! Sport category discovery from the homepage navigation menu.
//!
//! The portal lists its sport sections in a horizontally scrolling menu:
//!
//! ```html
//! <ul class="scroll-menu">
//!   <li class="scroll-menu-item">
//!     <a class="sport-text-hover" href="/sport/nogomet">Nogomet</a>
//!   </li>
//! </ul>
//! ```
//!
//! Each anchor becomes one [`CategoryLink`] whose url is resolved against the
//! configured site origin.

use super::{parse_selector, read_snapshot, urls::absolutize};
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::CategoryLink;
use crate::utils::collapse_whitespace;
use scraper::{Html, Selector};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const MENU_SELECTOR: &str = "ul.scroll-menu li.scroll-menu-item a.sport-text-hover";

pub struct CategoryExtractor {
    origin: String,
    menu: Selector,
}

impl CategoryExtractor {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            origin: config.origin(),
            menu: parse_selector(MENU_SELECTOR)?,
        })
    }

    /// Extract the categories listed in the menu of `document`, in menu order.
    ///
    /// A name that appears more than once keeps its first position and the
    /// url of its last occurrence. Anchors without an `href` or without
    /// visible text are skipped.
    ///
    /// Names are whitespace-collapsed as well as trimmed, so `"Moto\n  GP"`
    /// and `"Moto GP"` are the same category and share a file stem.
    pub fn extract(&self, document: &Html) -> Vec<CategoryLink> {
        let mut categories: Vec<CategoryLink> = Vec::new();

        for anchor in document.select(&self.menu) {
            let name = collapse_whitespace(&anchor.text().collect::<String>());
            let Some(href) = anchor
                .value()
                .attr("href")
                .map(str::trim)
                .filter(|h| !h.is_empty())
            else {
                warn!(%name, "Menu entry has no href; skipping");
                continue;
            };
            if name.is_empty() {
                warn!(%href, "Menu entry has no text; skipping");
                continue;
            }

            let url = absolutize(&self.origin, href);
            match categories.iter_mut().find(|c| c.name == name) {
                Some(existing) => {
                    debug!(%name, old = %existing.url, new = %url, "Repeated menu entry");
                    existing.url = url;
                }
                None => categories.push(CategoryLink { name, url }),
            }
        }

        categories
    }

    /// Parse `html` and extract its categories.
    pub fn extract_from_html(&self, html: &str) -> Vec<CategoryLink> {
        self.extract(&Html::parse_document(html))
    }

    /// Extract categories from a saved homepage snapshot.
    ///
    /// A missing or unreadable file is logged and yields no categories.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn extract_from_file(&self, path: &Path) -> Vec<CategoryLink> {
        let Some(html) = read_snapshot(path).await else {
            return Vec::new();
        };
        let categories = self.extract_from_html(&html);
        info!(count = categories.len(), "Extracted sport categories");
        categories
    }
}
