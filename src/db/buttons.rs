//! SQL access to the `event_buttons` table. Plain CRUD.

use crate::errors::AppResult;
use crate::models::event_button::EventButton;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<EventButton> {
    let color: i64 = row.get("color")?;
    Ok(EventButton {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        color: color as u32,
    })
}

/// Insert-or-replace by id. A button with `id == 0` gets a fresh id.
pub fn insert_button(conn: &Connection, b: &EventButton) -> AppResult<i64> {
    if b.id == 0 {
        conn.execute(
            "INSERT INTO event_buttons (code, name, color) VALUES (?1, ?2, ?3)",
            params![b.code, b.name, i64::from(b.color)],
        )?;
    } else {
        conn.execute(
            "INSERT OR REPLACE INTO event_buttons (id, code, name, color)
             VALUES (?1, ?2, ?3, ?4)",
            params![b.id, b.code, b.name, i64::from(b.color)],
        )?;
    }
    Ok(conn.last_insert_rowid())
}

pub fn insert_buttons(conn: &Connection, buttons: &[EventButton]) -> AppResult<()> {
    for b in buttons {
        insert_button(conn, b)?;
    }
    Ok(())
}

pub fn update_button(conn: &Connection, b: &EventButton) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE event_buttons SET code = ?1, name = ?2, color = ?3 WHERE id = ?4",
        params![b.code, b.name, i64::from(b.color), b.id],
    )?;
    Ok(n)
}

pub fn delete_button(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM event_buttons WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn delete_all_buttons(conn: &Connection) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM event_buttons", [])?;
    Ok(n)
}

pub fn list_buttons(conn: &Connection) -> AppResult<Vec<EventButton>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, code, name, color FROM event_buttons ORDER BY code ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// First button (lowest id) carrying `code`.
pub fn find_by_code(conn: &Connection, code: i32) -> AppResult<Option<EventButton>> {
    let b = conn
        .query_row(
            "SELECT id, code, name, color FROM event_buttons
             WHERE code = ?1 ORDER BY id ASC LIMIT 1",
            [code],
            map_row,
        )
        .optional()?;
    Ok(b)
}

pub fn count_buttons(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM event_buttons", [], |r| r.get(0))?;
    Ok(n)
}
