use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
/// Every other migration records itself here, so it must come first.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a versioned migration has already been recorded.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `events` table.
fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            event_index  INTEGER NOT NULL DEFAULT 0,
            event_code   INTEGER NOT NULL,
            event_name   TEXT NOT NULL,
            timestamp    TEXT NOT NULL,
            latitude     REAL NOT NULL DEFAULT 0,
            longitude    REAL NOT NULL DEFAULT 0,
            accuracy     REAL,
            note         TEXT NOT NULL DEFAULT '',
            photo_paths  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_events_code ON events(event_code);
        CREATE INDEX IF NOT EXISTS idx_events_index ON events(event_index);
        "#,
    )?;
    Ok(())
}

/// Create the `event_buttons` table.
/// `code` is deliberately NOT unique: uniqueness is a convention kept by the
/// settings flows, not a storage constraint.
fn create_buttons_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS event_buttons (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            code   INTEGER NOT NULL,
            name   TEXT NOT NULL,
            color  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_event_buttons_code ON event_buttons(code);
        "#,
    )?;
    Ok(())
}

fn migrate_base_schema(conn: &Connection) -> Result<()> {
    let version = "20250601_0001_base_schema";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    create_events_table(conn)?;
    create_buttons_table(conn)?;

    mark_applied(conn, version, "Created events and event_buttons tables")?;
    success(format!("Migration applied: {version}"));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Versioned steps, oldest first
    migrate_base_schema(conn)?;

    Ok(())
}
