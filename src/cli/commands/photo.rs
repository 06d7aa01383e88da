use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logger;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Photo { path, event } = cmd {
        // The reference is stored as given; a missing file is only reported.
        if !Path::new(path).exists() {
            warning(format!("'{}' does not exist (yet), storing the path anyway", path));
        }

        let mut repo = open_repo(cfg, false)?;
        let ev = logger::attach_photo(&mut repo, path, *event)?;

        success(format!(
            "Photo attached to #{} {} ({} photo(s))",
            ev.event_index,
            ev.event_name,
            ev.photo_paths.len()
        ));
        ttlog_quiet(repo.conn(), "photo", &format!("event {}", ev.id), path);
    }
    Ok(())
}
