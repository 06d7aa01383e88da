// src/export/logic.rs

use crate::config::Config;
use crate::core::repository::Repository;
use crate::db::events::EventOrder;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{ensure_writable, pick_file_name};
use crate::export::{CSV_MIME, csv, notify_export_success};
use crate::ui::messages::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the CSV file ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// Public downloads folder (or the configured `export_dir`).
    Downloads,
    /// Cache folder meant to be handed to another application.
    Share,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub mime: &'static str,
    pub rows: usize,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export every stored event as CSV.
    ///
    /// - `file`: custom file name (blank → `fieldlogger_export_<timestamp>.csv`).
    ///   An absolute path is used as-is, anything else lands in the target folder.
    /// - `force`: overwrite without asking (share exports never ask).
    pub fn export(
        repo: &Repository,
        cfg: &Config,
        target: ExportTarget,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<ExportOutcome> {
        let events = repo.events(EventOrder::ByIndex)?;
        if events.is_empty() {
            return Err(AppError::NothingToExport);
        }

        let dir = match target {
            ExportTarget::Downloads => cfg.export_dir(),
            ExportTarget::Share => cfg.share_dir(),
        };
        let path = resolve_path(&dir, &pick_file_name(file));

        if target == ExportTarget::Downloads {
            ensure_writable(&path, force)?;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info(format!("Exporting to CSV: {}", path.display()));
        let mut out = BufWriter::new(File::create(&path)?);
        csv::write_csv(&mut out, &events)?;
        out.flush()?;

        let label = match target {
            ExportTarget::Downloads => "CSV",
            ExportTarget::Share => "Shareable CSV",
        };
        notify_export_success(label, &path);

        Ok(ExportOutcome {
            path,
            mime: CSV_MIME,
            rows: events.len(),
        })
    }
}

fn resolve_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = PathBuf::from(name);
    if candidate.is_absolute() {
        candidate
    } else {
        dir.join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logger::tap;
    use crate::models::fix::Fix;
    use std::env;

    fn cfg_for(name: &str) -> Config {
        let dir = env::temp_dir().join(format!("{name}_fieldlogger_export"));
        fs::remove_dir_all(&dir).ok();
        Config {
            export_dir: Some(dir.join("downloads").to_string_lossy().to_string()),
            share_dir: Some(dir.join("share").to_string_lossy().to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn empty_log_is_not_exported() {
        let repo = Repository::open_in_memory().unwrap();
        let cfg = cfg_for("empty_log");
        assert!(matches!(
            ExportLogic::export(&repo, &cfg, ExportTarget::Downloads, None, true),
            Err(AppError::NothingToExport)
        ));
    }

    #[test]
    fn row_count_matches_stored_events() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.ensure_default_buttons().unwrap();
        for code in [1, 2, 3, 2] {
            tap(&mut repo, code, Fix::default()).unwrap();
        }
        let cfg = cfg_for("row_count");

        let out = ExportLogic::export(
            &repo,
            &cfg,
            ExportTarget::Downloads,
            Some("trip.csv"),
            true,
        )
        .unwrap();
        assert_eq!(out.rows, 4);
        assert!(out.path.ends_with("downloads/trip.csv"));

        let body = fs::read_to_string(&out.path).unwrap();
        assert_eq!(body.lines().count(), 5);
    }

    #[test]
    fn share_goes_to_share_dir_with_mime() {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.ensure_default_buttons().unwrap();
        tap(&mut repo, 1, Fix::default()).unwrap();
        let cfg = cfg_for("share_dir");

        let out = ExportLogic::export(&repo, &cfg, ExportTarget::Share, None, false).unwrap();
        assert_eq!(out.mime, "text/csv");
        assert!(out.path.starts_with(cfg.share_dir()));
        assert!(
            out.path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("fieldlogger_export_")
        );
    }
}
