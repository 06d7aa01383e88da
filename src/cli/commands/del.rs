use crate::cli::commands::{ask_confirmation, open_repo};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, all, yes } = cmd {
        let mut repo = open_repo(cfg, false)?;

        //
        // Confirmation prompt
        //
        let prompt = match id {
            Some(id) => {
                let ev = repo.find_event(*id)?.ok_or(AppError::EventNotFound(*id))?;
                format!(
                    "Delete event #{} {} ({})? This action is irreversible.",
                    ev.event_index, ev.event_name, ev.timestamp
                )
            }
            None => "Delete ALL events? This action is irreversible.".to_string(),
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        match id {
            Some(id) if !*all => {
                if !repo.delete_event(*id)? {
                    return Err(AppError::EventNotFound(*id));
                }
                success(format!("Event {} has been deleted.", id));
                ttlog_quiet(repo.conn(), "del", &format!("event {}", id), "Event deleted");
            }
            _ => {
                let n = repo.delete_all_events()?;
                success(format!("{} event(s) have been deleted.", n));
                ttlog_quiet(repo.conn(), "clear", "events", &format!("{} event(s) deleted", n));
            }
        }
    }

    Ok(())
}
