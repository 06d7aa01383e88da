pub mod buttons;
pub mod config;
pub mod counts;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod photo;
pub mod session;
pub mod tap;
pub mod undo;

use crate::config::Config;
use crate::core::repository::Repository;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Open the configured database. With `seed`, an empty button table gets
/// the default buttons first.
pub(crate) fn open_repo(cfg: &Config, seed: bool) -> AppResult<Repository> {
    let mut repo = Repository::open(&cfg.database)?;
    if seed {
        repo.ensure_default_buttons()?;
    }
    Ok(repo)
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
