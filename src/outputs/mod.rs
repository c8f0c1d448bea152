//! Files written to the output directory.
//!
//! # Submodules
//!
//! - [`snapshots`]: Raw HTML of the homepage and of every category page
//! - [`xlsx`]: One spreadsheet of news records per category
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── process_log.txt          # Log of the latest run
//! ├── Index_20250512083000.txt # Homepage snapshot
//! ├── Nogomet.txt              # Category snapshot
//! ├── Nogomet.xlsx             # Category news
//! ├── Moto_GP_F1.txt
//! └── Moto_GP_F1.xlsx
//! ```
//!
//! Files are overwritten on every run and are not written atomically.

pub mod snapshots;
pub mod xlsx;

/// Name of the log file kept next to the outputs.
pub const LOG_FILE_NAME: &str = "process_log.txt";
