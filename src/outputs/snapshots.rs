//! Raw HTML snapshots kept between the fetch and extraction passes.
//!
//! The homepage is saved as `Index_<YYYYmmddHHMMSS>.txt` so successive runs
//! keep their own copy; category pages are saved as `<stem>.txt` (see
//! [`CategoryLink::file_stem`]) and overwritten on every run.
//!
//! Each category's files are fixed once in a [`CategoryFiles`] value handed
//! from the fetch pass to the extraction pass. [`FileNamer`] keeps two
//! categories of one run from sharing a stem.

use super::LOG_FILE_NAME;
use crate::error::ScrapeError;
use crate::models::CategoryLink;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

pub const HOMEPAGE_PREFIX: &str = "Index_";
pub const SNAPSHOT_EXTENSION: &str = "txt";

/// Path of the homepage snapshot taken at `at`.
pub fn homepage_path(dir: &Path, at: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "{HOMEPAGE_PREFIX}{}.{SNAPSHOT_EXTENSION}",
        at.format("%Y%m%d%H%M%S")
    ))
}

pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Where one category's snapshot and spreadsheet live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFiles {
    pub snapshot: PathBuf,
    pub spreadsheet: PathBuf,
}

impl CategoryFiles {
    pub fn new(dir: &Path, stem: &str) -> Self {
        Self {
            snapshot: dir.join(format!("{stem}.{SNAPSHOT_EXTENSION}")),
            spreadsheet: dir.join(format!("{stem}.{SPREADSHEET_EXTENSION}")),
        }
    }
}

/// Hands out file stems that are unique within one run.
///
/// Stems are compared case-insensitively so that case-folding file systems
/// cannot merge two categories either. A repeated stem gets `_2`, `_3`, ...
#[derive(Debug, Default)]
pub struct FileNamer {
    used: HashSet<String>,
}

impl FileNamer {
    pub fn files_for(&mut self, dir: &Path, category: &CategoryLink) -> CategoryFiles {
        let base = category.file_stem();
        let mut stem = base.clone();
        let mut n = 1;
        while !self.used.insert(stem.to_lowercase()) {
            n += 1;
            stem = format!("{base}_{n}");
        }
        if n > 1 {
            warn!(name = %category.name, %stem, "File stem already taken; using suffixed stem");
        }
        CategoryFiles::new(dir, &stem)
    }
}

#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = html.len()))]
pub async fn save(path: &Path, html: &str) -> Result<(), ScrapeError> {
    fs::write(path, html)
        .await
        .map_err(|e| ScrapeError::io(path, e))?;
    info!("Saved snapshot");
    Ok(())
}

/// List the category snapshots present in `dir`, sorted by file name.
///
/// Used by offline runs, where there is no fresh menu to derive categories
/// from. The category name is recovered from the file stem and the url is
/// unknown, so it is left empty.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn discover_saved(
    dir: &Path,
) -> Result<Vec<(CategoryLink, CategoryFiles)>, ScrapeError> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| ScrapeError::io(dir, e))?;
    let mut saved = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| ScrapeError::io(dir, e))? {
        let path = entry.path();
        if !is_category_snapshot(&path) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            debug!(path = %path.display(), "Found category snapshot");
            saved.push((CategoryLink::new(stem, ""), CategoryFiles::new(dir, stem)));
        }
    }

    saved.sort_by(|a, b| a.1.snapshot.cmp(&b.1.snapshot));
    info!(count = saved.len(), "Discovered saved category snapshots");
    Ok(saved)
}

fn is_category_snapshot(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    path.extension().and_then(|e| e.to_str()) == Some(SNAPSHOT_EXTENSION)
        && !name.starts_with(HOMEPAGE_PREFIX)
        && name != LOG_FILE_NAME
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "index_sport_news_snapshots_{tag}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_homepage_path_is_timestamped() {
        let at = Local.with_ymd_and_hms(2025, 5, 12, 8, 30, 5).unwrap();
        let path = homepage_path(Path::new("data"), at);
        assert_eq!(path, PathBuf::from("data/Index_20250512083005.txt"));
    }

    #[test]
    fn test_category_files_use_safe_stem() {
        let link = CategoryLink::new("Moto GP/F1", "https://www.index.hr/sport/moto");
        let files = FileNamer::default().files_for(Path::new("data"), &link);
        assert_eq!(files.snapshot, PathBuf::from("data/Moto_GP_F1.txt"));
        assert_eq!(files.spreadsheet, PathBuf::from("data/Moto_GP_F1.xlsx"));
    }

    #[test]
    fn test_colliding_stems_get_suffixes() {
        let dir = Path::new("data");
        let mut namer = FileNamer::default();
        let stems: Vec<_> = ["Moto GP", "Moto/GP", "moto gp", "Tenis"]
            .into_iter()
            .map(|name| namer.files_for(dir, &CategoryLink::new(name, "")).snapshot)
            .collect();

        assert_eq!(
            stems,
            [
                PathBuf::from("data/Moto_GP.txt"),
                PathBuf::from("data/Moto_GP_2.txt"),
                PathBuf::from("data/moto_gp_3.txt"),
                PathBuf::from("data/Tenis.txt"),
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_saved_skips_homepage_log_and_other_files() {
        let dir = temp_dir("discover");
        for name in [
            "Index_20250512083005.txt",
            "process_log.txt",
            "Tenis.txt",
            "Nogomet.txt",
            "Nogomet.xlsx",
        ] {
            std::fs::write(dir.join(name), "<html></html>").unwrap();
        }

        let saved = discover_saved(&dir).await.unwrap();
        let names: Vec<_> = saved.iter().map(|(link, _)| link.name.as_str()).collect();
        assert_eq!(names, ["Nogomet", "Tenis"]);
        assert_eq!(saved[0].1.snapshot, dir.join("Nogomet.txt"));
        assert_eq!(saved[0].1.spreadsheet, dir.join("Nogomet.xlsx"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_save_then_read_back() {
        let dir = temp_dir("save");
        let path = dir.join("Nogomet.txt");
        save(&path, "<html>š</html>").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>š</html>");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_discover_saved_missing_dir_is_error() {
        let err = discover_saved(Path::new("/nonexistent/index_sport_news")).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Io { .. }));
    }
}
