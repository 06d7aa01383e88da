use super::event_button::EventButton;
use super::fix::Fix;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Timestamp layout stored in `events.timestamp` (local time, no zone).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,                  // ⇔ events.id (autoincrement)
    pub event_index: i64,         // ⇔ events.event_index (max + 1 at insert)
    pub event_code: i32,          // ⇔ events.event_code (→ event_buttons.code, no FK)
    pub event_name: String,       // ⇔ events.event_name
    pub timestamp: String,        // ⇔ events.timestamp (TEXT "YYYY-MM-DDTHH:MM:SS")
    pub latitude: f64,            // ⇔ events.latitude
    pub longitude: f64,           // ⇔ events.longitude
    pub accuracy: Option<f32>,    // ⇔ events.accuracy (NULL when unknown)
    pub note: String,             // ⇔ events.note (TEXT, default '')
    pub photo_paths: Vec<String>, // ⇔ events.photo_paths (comma separated)
}

/// An event that has not been stored yet: no id, no index.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub event_code: i32,
    pub event_name: String,
    pub timestamp: String,
    pub fix: Fix,
    pub note: String,
    pub photo_paths: Vec<String>,
}

impl NewEvent {
    /// Event produced by tapping `button` right now at `fix`.
    pub fn from_tap(button: &EventButton, fix: Fix) -> Self {
        Self {
            event_code: button.code,
            event_name: button.name.clone(),
            timestamp: now_timestamp(),
            fix,
            note: String::new(),
            photo_paths: Vec::new(),
        }
    }
}

impl Event {
    /// Parsed timestamp, `None` when the stored text is not in `TIMESTAMP_FORMAT`.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Pack a photo list into its column form (a JSON array of strings).
pub fn encode_photo_paths(paths: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(paths)
}

/// Unpack the photo column; a blank column is an empty list.
pub fn decode_photo_paths(raw: &str) -> serde_json::Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}
