//! News card extraction from a category page.
//!
//! A category page shows one large featured card followed by a grid of
//! smaller cards. Both are anchors wrapping their content, but the inner
//! markup differs:
//!
//! ```html
//! <div class="first-news-holder vertical">
//!   <a href="/sport/clanak/1">
//!     <div class="content-holder">
//!       <h2 class="title">..</h2> <p class="summary">..</p>
//!       <div class="publish-date">..</div>
//!     </div>
//!   </a>
//! </div>
//! <div class="grid-item">
//!   <a href="/sport/clanak/2">
//!     <div class="content">
//!       <h3 class="title">..</h3> <span class="summary">..</span>
//!       <div class="publish-date">..</div>
//!     </div>
//!   </a>
//! </div>
//! ```
//!
//! Title, summary and date are optional and fall back to placeholders. The
//! `href` is required: a card without one is logged and dropped.

use super::{parse_selector, read_snapshot, urls::absolutize};
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::{Field, NO_DATE, NO_SUMMARY, NO_TITLE, NewsRecord};
use crate::utils::{collapse_whitespace, truncate_for_log};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const FEATURED_SELECTOR: &str = "div.first-news-holder.vertical a";
const GRID_SELECTOR: &str = "div.grid-item a";

/// Selectors for the optional parts of one kind of card.
struct CardLayout {
    kind: &'static str,
    title: Selector,
    summary: Selector,
    publish_date: Selector,
}

impl CardLayout {
    fn featured() -> Result<Self, ScrapeError> {
        Ok(Self {
            kind: "featured",
            title: parse_selector("div.content-holder h2.title")?,
            summary: parse_selector("div.content-holder p.summary")?,
            publish_date: parse_selector("div.content-holder div.publish-date")?,
        })
    }

    fn grid() -> Result<Self, ScrapeError> {
        Ok(Self {
            kind: "grid",
            title: parse_selector("div.content h3.title")?,
            summary: parse_selector("div.content span.summary")?,
            publish_date: parse_selector("div.content div.publish-date")?,
        })
    }

    /// Build a record from a card anchor, or `None` if it has no usable href.
    fn record(&self, anchor: ElementRef<'_>, origin: &str) -> Option<NewsRecord> {
        let Some(href) = anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
        else {
            warn!(
                kind = self.kind,
                anchor = %truncate_for_log(&anchor.html(), 200),
                "News card has no href; skipping"
            );
            return None;
        };

        Some(NewsRecord {
            title: lookup(anchor, &self.title).or_placeholder(NO_TITLE),
            summary: lookup(anchor, &self.summary).or_placeholder(NO_SUMMARY),
            publish_date: lookup(anchor, &self.publish_date).or_placeholder(NO_DATE),
            url: absolutize(origin, href),
        })
    }
}

/// Text of the first element under `scope` matching `selector`.
///
/// Text nodes are concatenated, then every whitespace run collapses to a
/// single space and the ends are trimmed, so `<h2>\n  Derby\n  Day</h2>`
/// yields `Derby Day`. This keeps multi-line markup on one spreadsheet line;
/// it is stricter than trimming only the surrounding whitespace.
fn lookup(scope: ElementRef<'_>, selector: &Selector) -> Field {
    scope
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .into()
}

pub struct NewsExtractor {
    origin: String,
    max_grid_items: usize,
    featured_anchor: Selector,
    grid_anchor: Selector,
    featured: CardLayout,
    grid: CardLayout,
}

impl NewsExtractor {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            origin: config.origin(),
            max_grid_items: config.max_grid_items,
            featured_anchor: parse_selector(FEATURED_SELECTOR)?,
            grid_anchor: parse_selector(GRID_SELECTOR)?,
            featured: CardLayout::featured()?,
            grid: CardLayout::grid()?,
        })
    }

    /// Extract the featured record (if any) followed by up to
    /// `max_grid_items` grid records, in document order.
    pub fn extract(&self, document: &Html) -> Vec<NewsRecord> {
        let mut records = Vec::with_capacity(1 + self.max_grid_items);

        if let Some(anchor) = document.select(&self.featured_anchor).next() {
            records.extend(self.featured.record(anchor, &self.origin));
        } else {
            debug!("No featured news card");
        }

        records.extend(
            document
                .select(&self.grid_anchor)
                .take(self.max_grid_items)
                .filter_map(|anchor| self.grid.record(anchor, &self.origin)),
        );

        records
    }

    /// Parse `html` and extract its news records.
    pub fn extract_from_html(&self, html: &str) -> Vec<NewsRecord> {
        self.extract(&Html::parse_document(html))
    }

    /// Extract news records from a saved category snapshot.
    ///
    /// A missing or unreadable file is logged and yields no records.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn extract_from_file(&self, path: &Path) -> Vec<NewsRecord> {
        let Some(html) = read_snapshot(path).await else {
            return Vec::new();
        };
        let records = self.extract_from_html(&html);
        info!(count = records.len(), "Extracted news records");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> NewsExtractor {
        NewsExtractor::new(&ScrapeConfig::default()).unwrap()
    }

    fn featured(title: &str, href: &str) -> String {
        format!(
            r#"<div class="first-news-holder vertical"><a href="{href}">
                 <div class="content-holder">
                   <h2 class="title">{title}</h2>
                   <p class="summary">Summary of {title}</p>
                   <div class="publish-date">12.05.2025.</div>
                 </div>
               </a></div>"#
        )
    }

    fn grid(title: &str, href: &str) -> String {
        format!(
            r#"<div class="grid-item"><a href="{href}">
                 <div class="content">
                   <h3 class="title">{title}</h3>
                   <span class="summary">Summary of {title}</span>
                   <div class="publish-date">11.05.2025.</div>
                 </div>
               </a></div>"#
        )
    }

    fn page(body: &str) -> String {
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn test_featured_and_grid_capped_at_four() {
        let mut body = featured("Match Recap", "/news/1");
        for i in 1..=6 {
            body.push_str(&grid(&format!("G{i}"), &format!("/news/{}", i + 1)));
        }
        let records = extractor().extract_from_html(&page(&body));

        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Match Recap", "G1", "G2", "G3", "G4"]);
        let urls: Vec<_> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://www.index.hr/news/1",
                "https://www.index.hr/news/2",
                "https://www.index.hr/news/3",
                "https://www.index.hr/news/4",
                "https://www.index.hr/news/5",
            ]
        );
        assert_eq!(records[0].summary, "Summary of Match Recap");
        assert_eq!(records[0].publish_date, "12.05.2025.");
        assert_eq!(records[1].summary, "Summary of G1");
        assert_eq!(records[1].publish_date, "11.05.2025.");
    }

    #[test]
    fn test_no_matching_cards_yields_empty() {
        let html = page(
            r#"<div class="first-news-holder"><a href="/x">not vertical</a></div>
               <a href="/y">loose</a>"#,
        );
        assert!(extractor().extract_from_html(&html).is_empty());
    }

    #[test]
    fn test_featured_missing_optional_fields_get_placeholders() {
        let html = page(
            r#"<div class="first-news-holder vertical"><a href="/news/9">
                 <div class="content-holder"><h2 class="title"> Derby </h2></div>
               </a></div>"#,
        );
        let records = extractor().extract_from_html(&html);

        assert_eq!(
            records,
            vec![NewsRecord {
                title: "Derby".to_string(),
                summary: "No Summary".to_string(),
                publish_date: "No Date".to_string(),
                url: "https://www.index.hr/news/9".to_string(),
            }]
        );
    }

    #[test]
    fn test_grid_uses_its_own_tags() {
        // featured-style markup inside a grid card is not picked up
        let html = page(
            r#"<div class="grid-item"><a href="/g">
                 <div class="content"><h2 class="title">Wrong</h2><p class="summary">Wrong</p></div>
               </a></div>"#,
        );
        let records = extractor().extract_from_html(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "No Title");
        assert_eq!(records[0].summary, "No Summary");
        assert_eq!(records[0].publish_date, "No Date");
    }

    #[test]
    fn test_only_first_featured_anchor_is_used() {
        let html = page(&format!("{}{}", featured("First", "/a"), featured("Second", "/b")));
        let records = extractor().extract_from_html(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "First");
    }

    #[test]
    fn test_card_without_href_is_skipped_and_keeps_its_slot() {
        let mut body = String::from(
            r#"<div class="first-news-holder vertical"><a>
                 <div class="content-holder"><h2 class="title">Broken</h2></div>
               </a></div>"#,
        );
        body.push_str(&grid("G1", "/g1"));
        body.push_str(
            r#"<div class="grid-item"><a><div class="content"><h3 class="title">G2</h3></div></a></div>"#,
        );
        body.push_str(&grid("G3", "/g3"));
        body.push_str(&grid("G4", "/g4"));
        body.push_str(&grid("G5", "/g5"));

        let records = extractor().extract_from_html(&page(&body));
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["G1", "G3", "G4"]);
    }

    #[test]
    fn test_absolute_href_passes_through() {
        let html = page(&grid("Ext", "https://sportski.index.hr/clanak/5"));
        let records = extractor().extract_from_html(&html);
        assert_eq!(records[0].url, "https://sportski.index.hr/clanak/5");
    }

    #[test]
    fn test_grid_cap_follows_config() {
        let config = ScrapeConfig {
            max_grid_items: 0,
            ..ScrapeConfig::default()
        };
        let extractor = NewsExtractor::new(&config).unwrap();
        let html = page(&format!("{}{}", featured("Only", "/1"), grid("G", "/2")));
        let records = extractor.extract_from_html(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Only");
    }

    #[tokio::test]
    async fn test_extraction_from_saved_snapshot_is_repeatable() {
        let dir = std::env::temp_dir().join(format!(
            "index_sport_news_news_repeat_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Nogomet.txt");
        let mut body = featured("Match Recap", "/news/1");
        for i in 1..=6 {
            body.push_str(&grid(&format!("G{i}"), &format!("/news/{}", i + 1)));
        }
        std::fs::write(&path, page(&body)).unwrap();

        let extractor = extractor();
        let first = extractor.extract_from_file(&path).await;
        let second = extractor.extract_from_file(&path).await;

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_multiline_title_collapses_to_one_line() {
        let html = page(&grid("\n   Derby\n   Day  ", "/d"));
        let records = extractor().extract_from_html(&html);
        assert_eq!(records[0].title, "Derby Day");
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty() {
        let records = extractor()
            .extract_from_file(Path::new("/nonexistent/Nogomet.txt"))
            .await;
        assert!(records.is_empty());
    }
}
