// src/export/mod.rs

pub mod csv;
mod fs_utils;
pub mod logic;

pub use logic::{ExportLogic, ExportOutcome, ExportTarget};

use crate::ui::messages::success;
use std::path::Path;

/// MIME type handed to the share sink.
pub const CSV_MIME: &str = "text/csv";

/// Common helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}
