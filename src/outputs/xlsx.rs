//! Spreadsheet output for extracted news.
//!
//! Every category gets its own workbook with a single `News` sheet: a bold
//! header row (`Title`, `Summary`, `Publish Date`, `URL`) followed by one row
//! per record, in extraction order.

use crate::error::ScrapeError;
use crate::models::NewsRecord;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use std::path::Path;
use tracing::{info, instrument};

pub const SHEET_NAME: &str = "News";

/// Write `records` to a workbook at `path`.
///
/// # Returns
///
/// `Ok(true)` if the file was written, `Ok(false)` if `records` was empty and
/// nothing was written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub fn write_news(records: &[NewsRecord], path: &Path) -> Result<bool, ScrapeError> {
    if records.is_empty() {
        info!("No news records; spreadsheet not written");
        return Ok(false);
    }

    build_workbook(records)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| ScrapeError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Wrote news spreadsheet");
    Ok(true)
}

fn build_workbook(records: &[NewsRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in NewsRecord::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as ColNum, *title, &header)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as RowNum;
        for (col, value) in record.cells().iter().enumerate() {
            sheet.write_string(row, col as ColNum, *value)?;
        }
    }

    Ok(workbook)
}
