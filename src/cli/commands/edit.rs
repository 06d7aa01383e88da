use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logger::{self, EventEdit};
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{accuracy, coordinate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        name,
        note,
        code,
        lat,
        lon,
        acc,
    } = cmd
    {
        let edit = EventEdit {
            name: name.clone(),
            note: note.clone(),
            code: code.clone(),
            latitude: lat.clone(),
            longitude: lon.clone(),
            accuracy: acc.clone(),
        };

        if edit.is_empty() {
            info("Nothing to change.");
            return Ok(());
        }

        let mut repo = open_repo(cfg, false)?;
        let ev = logger::edit_event(&mut repo, *id, &edit)?;

        let p = cfg.coordinate_precision;
        success(format!(
            "Event #{} updated: {} (code {}) {}, {} {}",
            ev.event_index,
            ev.event_name,
            ev.event_code,
            coordinate(ev.latitude, p),
            coordinate(ev.longitude, p),
            accuracy(ev.accuracy)
        ));
        ttlog_quiet(
            repo.conn(),
            "edit",
            &format!("event {}", ev.id),
            &format!("name={} code={} note={}", ev.event_name, ev.event_code, ev.note),
        );
    }
    Ok(())
}
