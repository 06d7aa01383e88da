use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logger;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::fix::Fix;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tap { code, lat, lon, acc } = cmd {
        let mut repo = open_repo(cfg, true)?;
        let fix = Fix::from_parts(*lat, *lon, *acc);

        let ev = logger::tap(&mut repo, *code, fix)?;

        success(format!(
            "Logged #{} {} at {} [{}]",
            ev.event_index,
            ev.event_name,
            ev.timestamp,
            fix.describe()
        ));
        ttlog_quiet(
            repo.conn(),
            "tap",
            &format!("event {}", ev.id),
            &format!("code={} index={}", ev.event_code, ev.event_index),
        );
    }
    Ok(())
}
