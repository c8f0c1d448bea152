//! Data models for discovered categories and extracted news items.
//!
//! This module defines the core data structures used throughout the application:
//! - [`CategoryLink`]: One entry of the site's sport navigation menu
//! - [`NewsRecord`]: One news card extracted from a category page
//! - [`Field`]: Result of looking up an optional piece of card markup
//!
//! Records are built once by the extractors and only read afterwards.

/// Placeholder for a card without a title element.
pub const NO_TITLE: &str = "No Title";
/// Placeholder for a card without a summary element.
pub const NO_SUMMARY: &str = "No Summary";
/// Placeholder for a card without a publish-date element.
pub const NO_DATE: &str = "No Date";

/// Longest file stem derived from a category name, in bytes.
///
/// Leaves room for a collision suffix and extension under the common
/// 255-byte file name limit.
pub const MAX_STEM_BYTES: usize = 200;

/// A sport category discovered in the homepage navigation menu.
///
/// # Fields
///
/// * `name` - The visible menu text, trimmed
/// * `url` - The absolute url of the category page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    /// The category name as shown in the menu.
    pub name: String,
    /// The absolute url of the category page.
    pub url: String,
}

impl CategoryLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// File stem used for this category's snapshot and spreadsheet.
    ///
    /// Spaces and slashes become underscores so the name can never escape
    /// the output directory, and the result is cut on a character boundary to
    /// at most [`MAX_STEM_BYTES`] bytes so it stays within file name limits.
    ///
    /// The stem is not guaranteed unique across categories; see
    /// [`FileNamer`](crate::outputs::snapshots::FileNamer).
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(CategoryLink::new("Moto GP/F1", "..").file_stem(), "Moto_GP_F1");
    /// ```
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.name.len().min(MAX_STEM_BYTES));
        for c in self.name.chars() {
            if stem.len() + c.len_utf8() > MAX_STEM_BYTES {
                break;
            }
            stem.push(match c {
                ' ' | '/' | '\\' => '_',
                c => c,
            });
        }
        stem
    }
}

/// A single news item as extracted from a category page.
///
/// Optional fields carry a placeholder when the markup lacks them; `url` is
/// always taken from the card's anchor and is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    pub title: String,
    pub summary: String,
    pub publish_date: String,
    pub url: String,
}

impl NewsRecord {
    /// Column headers, in the order [`NewsRecord::cells`] yields values.
    pub const COLUMNS: [&'static str; 4] = ["Title", "Summary", "Publish Date", "URL"];

    pub fn cells(&self) -> [&str; 4] {
        [&self.title, &self.summary, &self.publish_date, &self.url]
    }
}

/// Outcome of looking up one optional element inside a news card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// The element exists; holds its trimmed text.
    Found(String),
    /// No element matched.
    Absent,
}

impl Field {
    pub fn or_placeholder(self, placeholder: &str) -> String {
        match self {
            Field::Found(text) => text,
            Field::Absent => placeholder.to_string(),
        }
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Absent, Field::Found)
    }
}
