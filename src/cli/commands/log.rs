use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let repo = open_repo(cfg, false)?;
        LogLogic::print_log(&repo)?;
    }

    Ok(())
}
