//! CSV rendering of the event log.

use crate::errors::AppResult;
use crate::models::event::Event;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

pub const HEADERS: [&str; 6] = [
    "Index",
    "Event Name",
    "Timestamp",
    "Latitude",
    "Longitude",
    "Note",
];

/// Text column: always wrapped in double quotes, inner quotes doubled.
fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Coordinate column: bare number that always keeps a decimal part
/// (`45.0`, not `45`).
fn coordinate(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Write the header and one row per event, sorted by index ascending.
///
/// Quoting is decided per column, not per value: name, timestamp and note
/// are always quoted, index and coordinates never are.
pub fn write_csv<W: Write>(out: &mut W, events: &[Event]) -> AppResult<()> {
    // Fields arrive already quoted, the writer only joins them.
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(HEADERS)?;

    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|ev| (ev.event_index, ev.id));

    for ev in sorted {
        wtr.write_record(&[
            ev.event_index.to_string(),
            quoted(&ev.event_name),
            quoted(&ev.timestamp),
            coordinate(ev.latitude),
            coordinate(ev.longitude),
            quoted(&ev.note),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Whole export as a UTF-8 string.
pub fn build_csv(events: &[Event]) -> AppResult<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, events)?;
    // Every field comes from a Rust String, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(index: i64, name: &str, note: &str) -> Event {
        Event {
            id: index,
            event_index: index,
            event_code: 1,
            event_name: name.to_string(),
            timestamp: "2025-06-01T10:00:00".to_string(),
            latitude: 45.5,
            longitude: -7.25,
            accuracy: None,
            note: note.to_string(),
            photo_paths: Vec::new(),
        }
    }

    #[test]
    fn header_is_unquoted() {
        let out = build_csv(&[]).unwrap();
        assert_eq!(out, "Index,Event Name,Timestamp,Latitude,Longitude,Note\n");
    }

    #[test]
    fn numbers_bare_text_quoted() {
        let out = build_csv(&[ev(1, "Event 1", "")]).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#"1,"Event 1","2025-06-01T10:00:00",45.5,-7.25,"""#
        );
    }

    #[test]
    fn inner_quotes_are_doubled() {
        let out = build_csv(&[ev(1, "Say \"hi\"", "a, b")]).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains(r#""Say ""hi""""#));
        assert!(row.contains(r#""a, b""#));
    }

    #[test]
    fn rows_sorted_by_index() {
        let out = build_csv(&[ev(3, "c", ""), ev(1, "a", ""), ev(2, "b", "")]).unwrap();
        let firsts: Vec<&str> = out
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(firsts, vec!["1", "2", "3"]);
    }

    #[test]
    fn numeric_looking_text_is_still_quoted() {
        let out = build_csv(&[ev(1, "42", "NaN")]).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#"1,"42","2025-06-01T10:00:00",45.5,-7.25,"NaN""#
        );
    }

    #[test]
    fn whole_coordinates_keep_one_decimal() {
        let mut e = ev(1, "Event 1", "1e3");
        e.latitude = 45.0;
        e.longitude = 0.0;
        let out = build_csv(&[e]).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#"1,"Event 1","2025-06-01T10:00:00",45.0,0.0,"1e3""#
        );
    }
}
