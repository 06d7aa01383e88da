//! SQL access to the `events` table.
//!
//! Every function works on a bare `Connection` so that callers can run it
//! inside a transaction (`Transaction` derefs to `Connection`).

use crate::errors::AppResult;
use crate::models::event::{Event, NewEvent, decode_photo_paths, encode_photo_paths};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Ordering used by `list_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrder {
    /// Most recently inserted first (id DESC).
    Newest,
    /// Most recent timestamp first (timestamp DESC, id DESC on ties).
    Latest,
    /// Display order (event_index ASC).
    ByIndex,
}

impl EventOrder {
    fn sql(&self) -> &'static str {
        match self {
            EventOrder::Newest => "id DESC",
            EventOrder::Latest => "timestamp DESC, id DESC",
            EventOrder::ByIndex => "event_index ASC, id ASC",
        }
    }
}

const EVENT_COLUMNS: &str = "id, event_index, event_code, event_name, timestamp,
     latitude, longitude, accuracy, note, photo_paths";

pub fn map_row(row: &Row) -> Result<Event> {
    let photos: String = row.get("photo_paths")?;
    let photo_paths = decode_photo_paths(&photos).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
    })?;
    let accuracy: Option<f64> = row.get("accuracy")?;

    Ok(Event {
        id: row.get("id")?,
        event_index: row.get("event_index")?,
        event_code: row.get("event_code")?,
        event_name: row.get("event_name")?,
        timestamp: row.get("timestamp")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        accuracy: accuracy.map(|a| a as f32),
        note: row.get("note")?,
        photo_paths,
    })
}

/// Insert a new event with an already computed display index.
/// Returns the storage id assigned by SQLite.
pub fn insert_event(conn: &Connection, ev: &NewEvent, event_index: i64) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (event_index, event_code, event_name, timestamp,
                             latitude, longitude, accuracy, note, photo_paths)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event_index,
            ev.event_code,
            ev.event_name,
            ev.timestamp,
            ev.fix.latitude,
            ev.fix.longitude,
            ev.fix.accuracy.map(f64::from),
            ev.note,
            encode_photo_paths(&ev.photo_paths)?,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_events(conn: &Connection, order: EventOrder) -> AppResult<Vec<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY {}", order.sql());
    let mut stmt = conn.prepare_cached(&sql)?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_event(conn: &Connection, id: i64) -> AppResult<Option<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1");
    let ev = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(ev)
}

pub fn max_index(conn: &Connection) -> AppResult<Option<i64>> {
    let max: Option<i64> = conn.query_row("SELECT MAX(event_index) FROM events", [], |r| r.get(0))?;
    Ok(max)
}

/// Update every column of an event except its id.
/// Returns the number of rows touched (0 when the id is unknown).
pub fn update_event(conn: &Connection, ev: &Event) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE events
         SET event_index = ?1, event_code = ?2, event_name = ?3,
             timestamp = ?4, latitude = ?5, longitude = ?6,
             accuracy = ?7, note = ?8, photo_paths = ?9
         WHERE id = ?10",
        params![
            ev.event_index,
            ev.event_code,
            ev.event_name,
            ev.timestamp,
            ev.latitude,
            ev.longitude,
            ev.accuracy.map(f64::from),
            ev.note,
            encode_photo_paths(&ev.photo_paths)?,
            ev.id,
        ],
    )?;
    Ok(n)
}

pub fn set_photo_paths(conn: &Connection, id: i64, paths: &[String]) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE events SET photo_paths = ?1 WHERE id = ?2",
        params![encode_photo_paths(paths)?, id],
    )?;
    Ok(n)
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn delete_all_events(conn: &Connection) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM events", [])?;
    Ok(n)
}

pub fn count_by_code(conn: &Connection, code: i32) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached("SELECT COUNT(*) FROM events WHERE event_code = ?1")?;
    let n = stmt.query_row([code], |r| r.get(0))?;
    Ok(n)
}

pub fn count_all(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0))?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::models::fix::Fix;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn new_event(code: i32, ts: &str) -> NewEvent {
        NewEvent {
            event_code: code,
            event_name: format!("Event {code}"),
            timestamp: ts.to_string(),
            fix: Fix::new(45.0, 9.0, None),
            note: String::new(),
            photo_paths: Vec::new(),
        }
    }

    #[test]
    fn max_index_is_none_on_empty_table() {
        let c = conn();
        assert_eq!(max_index(&c).unwrap(), None);
        insert_event(&c, &new_event(1, "2025-06-01T10:00:00"), 7).unwrap();
        assert_eq!(max_index(&c).unwrap(), Some(7));
    }

    #[test]
    fn orders_differ_between_id_and_timestamp() {
        let c = conn();
        // inserted later, but with an older timestamp
        let a = insert_event(&c, &new_event(1, "2025-06-01T12:00:00"), 1).unwrap();
        let b = insert_event(&c, &new_event(2, "2025-06-01T08:00:00"), 2).unwrap();

        let newest = list_events(&c, EventOrder::Newest).unwrap();
        assert_eq!(newest[0].id, b);

        let latest = list_events(&c, EventOrder::Latest).unwrap();
        assert_eq!(latest[0].id, a);
    }

    #[test]
    fn update_touches_only_the_target_row() {
        let c = conn();
        let a = insert_event(&c, &new_event(1, "2025-06-01T10:00:00"), 1).unwrap();
        let b = insert_event(&c, &new_event(2, "2025-06-01T10:01:00"), 2).unwrap();

        let mut ev = find_event(&c, a).unwrap().unwrap();
        ev.note = "flooded trail".into();
        ev.accuracy = Some(3.5);
        assert_eq!(update_event(&c, &ev).unwrap(), 1);

        let stored = find_event(&c, a).unwrap().unwrap();
        assert_eq!(stored.note, "flooded trail");
        assert_eq!(stored.accuracy, Some(3.5));
        assert_eq!(find_event(&c, b).unwrap().unwrap().note, "");
    }

    #[test]
    fn update_of_missing_row_reports_zero() {
        let c = conn();
        let ghost = Event {
            id: 99,
            event_index: 1,
            event_code: 1,
            event_name: "x".into(),
            timestamp: "2025-06-01T10:00:00".into(),
            latitude: 0.0,
            longitude: 0.0,
            accuracy: None,
            note: String::new(),
            photo_paths: Vec::new(),
        };
        assert_eq!(update_event(&c, &ghost).unwrap(), 0);
    }

    #[test]
    fn counts_by_code_and_total() {
        let c = conn();
        insert_event(&c, &new_event(1, "2025-06-01T10:00:00"), 1).unwrap();
        insert_event(&c, &new_event(1, "2025-06-01T10:01:00"), 2).unwrap();
        insert_event(&c, &new_event(4, "2025-06-01T10:02:00"), 3).unwrap();

        assert_eq!(count_by_code(&c, 1).unwrap(), 2);
        assert_eq!(count_by_code(&c, 4).unwrap(), 1);
        assert_eq!(count_by_code(&c, 6).unwrap(), 0);
        assert_eq!(count_all(&c).unwrap(), 3);

        assert_eq!(delete_all_events(&c).unwrap(), 3);
        assert_eq!(count_all(&c).unwrap(), 0);
    }

    #[test]
    fn photo_list_survives_commas_in_paths() {
        let c = conn();
        let id = insert_event(&c, &new_event(1, "2025-06-01T10:00:00"), 1).unwrap();
        let paths = vec!["/sd/trip 3, day 2/a.jpg".to_string(), "b.jpg".to_string()];

        assert_eq!(set_photo_paths(&c, id, &paths).unwrap(), 1);
        assert_eq!(find_event(&c, id).unwrap().unwrap().photo_paths, paths);
    }
}
