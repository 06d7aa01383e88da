use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::repository::Repository;
use crate::db::log;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the default event buttons, when none exist yet
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURATION
    //
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing fieldlogger…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ DATABASE (tables + migrations)
    //
    let mut repo = Repository::open(&db_path)?;
    println!("✅ Database initialized at {}", &db_path);

    //
    // 3️⃣ DEFAULT BUTTONS
    //
    if repo.ensure_default_buttons()? {
        println!("🔘 Default buttons created ({})", repo.button_count()?);
    }

    //
    // 4️⃣ INTERNAL LOG (non blocking)
    //
    if let Err(e) = log::ttlog(
        repo.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 fieldlogger initialization completed!");
    Ok(())
}
