//! User-level flows built on the repository: tapping, undo, photos,
//! manual edits and button settings.

use crate::core::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, NewEvent};
use crate::models::event_button::{EventButton, next_palette_color, parse_color};
use crate::models::fix::Fix;
use std::str::FromStr;

/// Log one event for the button carrying `code`.
pub fn tap(repo: &mut Repository, code: i32, fix: Fix) -> AppResult<Event> {
    if !fix.is_finite() {
        return Err(AppError::InvalidInput(format!(
            "location must be finite, got {}",
            fix.describe()
        )));
    }
    let button = repo
        .find_button(code)?
        .ok_or(AppError::UnknownButton(code))?;
    repo.save_event(NewEvent::from_tap(&button, fix))
}

/// Remove the most recent event. `None` when there was nothing to undo.
pub fn undo(repo: &mut Repository) -> AppResult<Option<Event>> {
    let Some(last) = repo.last_event()? else {
        return Ok(None);
    };
    repo.delete_event(last.id)?;
    Ok(Some(last))
}

/// Attach a photo reference to `event_id`, or to the most recent event.
pub fn attach_photo(
    repo: &mut Repository,
    photo_path: &str,
    event_id: Option<i64>,
) -> AppResult<Event> {
    if photo_path.trim().is_empty() {
        return Err(AppError::InvalidInput("photo path is empty".into()));
    }

    let target = match event_id {
        Some(id) => id,
        None => repo.last_event()?.ok_or(AppError::NoEvents)?.id,
    };
    repo.add_photo(target, photo_path)
}

/// Raw text typed by the user while editing an event.
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct EventEdit {
    pub name: Option<String>,
    pub note: Option<String>,
    pub code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub accuracy: Option<String>,
}

/// Parse `input`, keeping `previous` when the text is not a valid number.
fn parse_or_keep<T: FromStr + Copy>(input: Option<&String>, previous: T) -> T {
    input
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(previous)
}

/// Same as `parse_or_keep`, but `NaN` and infinities count as malformed.
fn parse_coord_or_keep(input: Option<&String>, previous: f64) -> f64 {
    input
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(previous)
}

impl EventEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.note.is_none()
            && self.code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.accuracy.is_none()
    }

    /// Apply the edit on a copy of `ev`.
    ///
    /// Malformed numbers silently keep the previous value, a blank name
    /// keeps the old name. An empty accuracy clears it.
    pub fn apply_to(&self, ev: &Event) -> Event {
        let mut out = ev.clone();

        if let Some(name) = &self.name
            && !name.trim().is_empty()
        {
            out.event_name = name.trim().to_string();
        }
        if let Some(note) = &self.note {
            out.note = note.clone();
        }

        out.event_code = parse_or_keep(self.code.as_ref(), ev.event_code);
        out.latitude = parse_coord_or_keep(self.latitude.as_ref(), ev.latitude);
        out.longitude = parse_coord_or_keep(self.longitude.as_ref(), ev.longitude);

        out.accuracy = match self.accuracy.as_deref().map(str::trim) {
            None => ev.accuracy,
            Some("") => None,
            Some(s) => s
                .parse::<f32>()
                .ok()
                .filter(|a| a.is_finite())
                .or(ev.accuracy),
        };

        out
    }
}

/// Load an event, apply the edit and store it back.
pub fn edit_event(repo: &mut Repository, id: i64, edit: &EventEdit) -> AppResult<Event> {
    let current = repo.find_event(id)?.ok_or(AppError::EventNotFound(id))?;
    let updated = edit.apply_to(&current);
    repo.update_event(&updated)?;
    Ok(updated)
}

// ------------------------------------------------
// Button settings
// ------------------------------------------------

fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Please enter a name".into()));
    }
    Ok(name.to_string())
}

fn color_arg(color: Option<&str>, fallback: u32) -> AppResult<u32> {
    match color {
        None => Ok(fallback),
        Some(c) => parse_color(c)
            .ok_or_else(|| AppError::InvalidInput(format!("invalid colour '{c}'"))),
    }
}

/// New button with code = max code + 1 (1 on an empty table).
pub fn add_button(repo: &mut Repository, name: &str, color: Option<&str>) -> AppResult<EventButton> {
    let name = clean_name(name)?;
    let existing = repo.buttons()?;

    let code = existing.iter().map(|b| b.code).max().map_or(1, |m| m + 1);
    let color = color_arg(color, next_palette_color(existing.len()))?;

    let mut button = EventButton::new(code, &name, color);
    button.id = repo.save_button(&button)?;
    Ok(button)
}

fn existing_button(repo: &Repository, code: i32) -> AppResult<EventButton> {
    repo.find_button(code)?.ok_or(AppError::UnknownButton(code))
}

pub fn rename_button(repo: &mut Repository, code: i32, name: &str) -> AppResult<EventButton> {
    let mut button = existing_button(repo, code)?;
    button.name = clean_name(name)?;
    repo.update_button(&button)?;
    Ok(button)
}

pub fn recolor_button(repo: &mut Repository, code: i32, color: &str) -> AppResult<EventButton> {
    let mut button = existing_button(repo, code)?;
    button.color = color_arg(Some(color), button.color)?;
    repo.update_button(&button)?;
    Ok(button)
}

/// Remove the button; events logged with its code are kept.
pub fn remove_button(repo: &mut Repository, code: i32) -> AppResult<EventButton> {
    let button = existing_button(repo, code)?;
    repo.delete_button(&button)?;
    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Repository {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.ensure_default_buttons().unwrap();
        repo
    }

    #[test]
    fn tap_uses_button_name_and_fix() {
        let mut repo = setup();
        let ev = tap(&mut repo, 3, Fix::new(45.07, 7.68, Some(12.0))).unwrap();
        assert_eq!(ev.event_code, 3);
        assert_eq!(ev.event_name, "Event 3");
        assert_eq!(ev.latitude, 45.07);
        assert_eq!(ev.accuracy, Some(12.0));
    }

    #[test]
    fn tap_unknown_code_fails() {
        let mut repo = setup();
        assert!(matches!(
            tap(&mut repo, 42, Fix::default()),
            Err(AppError::UnknownButton(42))
        ));
    }

    #[test]
    fn undo_removes_last_and_reports_empty() {
        let mut repo = setup();
        assert!(undo(&mut repo).unwrap().is_none());

        tap(&mut repo, 1, Fix::default()).unwrap();
        let second = tap(&mut repo, 2, Fix::default()).unwrap();

        // same second: the higher id wins the tie
        let undone = undo(&mut repo).unwrap().unwrap();
        assert_eq!(undone.id, second.id);
        assert_eq!(repo.total_event_count().unwrap(), 1);
    }

    #[test]
    fn photo_defaults_to_last_event() {
        let mut repo = setup();
        assert!(matches!(
            attach_photo(&mut repo, "a.jpg", None),
            Err(AppError::NoEvents)
        ));

        tap(&mut repo, 1, Fix::default()).unwrap();
        let last = tap(&mut repo, 2, Fix::default()).unwrap();
        let ev = attach_photo(&mut repo, "a.jpg", None).unwrap();
        assert_eq!(ev.id, last.id);
        assert_eq!(ev.photo_paths, vec!["a.jpg"]);
    }

    #[test]
    fn malformed_numbers_keep_previous_values() {
        let mut repo = setup();
        let ev = tap(&mut repo, 1, Fix::new(10.0, 20.0, Some(5.0))).unwrap();

        let edit = EventEdit {
            latitude: Some("north-ish".into()),
            longitude: Some(" 21.5 ".into()),
            accuracy: Some("??".into()),
            code: Some("two".into()),
            note: Some("muddy".into()),
            ..Default::default()
        };
        let updated = edit_event(&mut repo, ev.id, &edit).unwrap();

        assert_eq!(updated.latitude, 10.0);
        assert_eq!(updated.longitude, 21.5);
        assert_eq!(updated.accuracy, Some(5.0));
        assert_eq!(updated.event_code, 1);
        assert_eq!(updated.note, "muddy");
        assert_eq!(repo.find_event(ev.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn blank_name_is_ignored_and_empty_accuracy_clears() {
        let mut repo = setup();
        let ev = tap(&mut repo, 1, Fix::new(1.0, 2.0, Some(3.0))).unwrap();
        let edit = EventEdit {
            name: Some("   ".into()),
            accuracy: Some(String::new()),
            ..Default::default()
        };
        assert!(!edit.is_empty());
        let out = edit.apply_to(&ev);
        assert_eq!(out.event_name, "Event 1");
        assert_eq!(out.accuracy, None);
    }

    #[test]
    fn add_button_takes_next_code_and_palette_color() {
        let mut repo = setup();
        let b = add_button(&mut repo, "  Fox  ", None).unwrap();
        assert_eq!(b.code, 7);
        assert_eq!(b.name, "Fox");
        assert_eq!(b.color, 0xFF6D4C41);
        assert!(b.id > 0);

        assert!(matches!(
            add_button(&mut repo, " ", None),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn add_button_on_empty_table_starts_at_one() {
        let mut repo = Repository::open_in_memory().unwrap();
        let b = add_button(&mut repo, "First", Some("#123456")).unwrap();
        assert_eq!(b.code, 1);
        assert_eq!(b.color, 0xFF123456);
    }

    #[test]
    fn rename_recolor_remove() {
        let mut repo = setup();
        rename_button(&mut repo, 2, "Deer").unwrap();
        recolor_button(&mut repo, 2, "#000000").unwrap();
        let b = repo.find_button(2).unwrap().unwrap();
        assert_eq!(b.name, "Deer");
        assert_eq!(b.color, 0xFF000000);

        assert!(recolor_button(&mut repo, 2, "nope").is_err());
        remove_button(&mut repo, 2).unwrap();
        assert!(matches!(
            remove_button(&mut repo, 2),
            Err(AppError::UnknownButton(2))
        ));
    }

    #[test]
    fn non_finite_edits_keep_previous_values() {
        let mut repo = setup();
        let ev = tap(&mut repo, 1, Fix::new(10.0, 20.0, Some(5.0))).unwrap();

        let edit = EventEdit {
            latitude: Some("NaN".into()),
            longitude: Some("inf".into()),
            accuracy: Some("-infinity".into()),
            ..Default::default()
        };
        let updated = edit_event(&mut repo, ev.id, &edit).unwrap();

        assert_eq!(updated.latitude, 10.0);
        assert_eq!(updated.longitude, 20.0);
        assert_eq!(updated.accuracy, Some(5.0));
        assert_eq!(repo.find_event(ev.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn tap_rejects_non_finite_location() {
        let mut repo = setup();
        assert!(matches!(
            tap(&mut repo, 1, Fix::new(f64::NAN, 7.0, None)),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            tap(&mut repo, 1, Fix::new(45.0, 7.0, Some(f32::INFINITY))),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(repo.total_event_count().unwrap(), 0);
    }

    #[test]
    fn photo_paths_with_commas_are_stored_intact() {
        let mut repo = setup();
        tap(&mut repo, 1, Fix::default()).unwrap();

        let ev = attach_photo(&mut repo, "/sd/trip 3, day 2/a.jpg", None).unwrap();
        assert_eq!(ev.photo_paths, vec!["/sd/trip 3, day 2/a.jpg"]);
        assert_eq!(repo.find_event(ev.id).unwrap().unwrap(), ev);
    }
}
