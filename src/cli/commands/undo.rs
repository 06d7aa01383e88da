use crate::cli::commands::open_repo;
use crate::config::Config;
use crate::core::logger;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut repo = open_repo(cfg, false)?;

    match logger::undo(&mut repo)? {
        Some(ev) => {
            success(format!(
                "Removed #{} {} ({})",
                ev.event_index, ev.event_name, ev.timestamp
            ));
            ttlog_quiet(
                repo.conn(),
                "undo",
                &format!("event {}", ev.id),
                &format!("Removed {} logged at {}", ev.event_name, ev.timestamp),
            );
        }
        None => info("Nothing to undo."),
    }
    Ok(())
}
