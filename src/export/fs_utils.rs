// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use chrono::Local;
use std::io::{self, Write};
use std::path::Path;

/// Check whether a file can be created or overwritten.
///
/// - file does NOT exist → Ok
/// - file exists and `force` → Ok
/// - file exists and `force == false` → ask the user
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::from(io::Error::other(
            "Export cancelled: existing file not overwritten",
        )))
    }
}

/// `fieldlogger_export_YYYYMMDD_HHMMSS.csv`, local time.
pub(crate) fn generate_file_name() -> String {
    format!(
        "fieldlogger_export_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// User-supplied name when not blank, generated otherwise.
pub(crate) fn pick_file_name(custom: Option<&str>) -> String {
    match custom.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => generate_file_name(),
    }
}
