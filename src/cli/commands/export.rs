use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportTarget};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { file, share, force } = cmd {
        let repo = open_repo(cfg, false)?;

        let target = if *share {
            ExportTarget::Share
        } else {
            ExportTarget::Downloads
        };

        let outcome = ExportLogic::export(&repo, cfg, target, file.as_deref(), *force)?;

        if *share {
            // the share sink receives path + mime
            info(format!(
                "Ready to share: {} ({})",
                outcome.path.display(),
                outcome.mime
            ));
        }

        let op = if *share { "share" } else { "export" };
        ttlog_quiet(
            repo.conn(),
            op,
            &outcome.path.to_string_lossy(),
            &format!("{} row(s)", outcome.rows),
        );
    }
    Ok(())
}
