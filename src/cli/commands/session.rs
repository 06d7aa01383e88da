//! Interactive logging session.
//!
//! One command per line:
//!   `<code>`    log an event for that button
//!   `u`         undo the last event (once per tap)
//!   `p <path>`  attach a photo to the last event
//!   `q`         quit (end of input quits too)
//!
//! Counts are printed again whenever the aggregation changes.

use crate::cli::commands::counts::render_counts;
use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::CountBoard;
use crate::core::logger;
use crate::core::repository::Repository;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::fix::Fix;
use crate::ui::messages::{error, header, info, success, warning};
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq)]
enum SessionInput<'a> {
    Tap(i32),
    Undo,
    Photo(&'a str),
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> SessionInput<'_> {
    let line = line.trim();
    match line {
        "" => SessionInput::Empty,
        "u" | "undo" => SessionInput::Undo,
        "q" | "quit" | "exit" => SessionInput::Quit,
        "?" | "h" | "help" => SessionInput::Help,
        _ => {
            if let Some(path) = line.strip_prefix("p ") {
                return SessionInput::Photo(path.trim());
            }
            match line.parse::<i32>() {
                Ok(code) => SessionInput::Tap(code),
                Err(_) => SessionInput::Unknown(line),
            }
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { lat, lon, acc } = cmd {
        let mut repo = open_repo(cfg, true)?;
        let fix = Fix::from_parts(*lat, *lon, *acc);
        let mut board = CountBoard::load(&repo)?;

        header("fieldlogger session");
        info(format!("Location: {}", fix.describe()));
        print_help();
        print!("{}", render_counts(board.buttons(), board.snapshot()));

        // One undo per tap, as on the logging screen
        let mut can_undo = false;

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("> ");
            let _ = io::stdout().flush();

            let Some(line) = lines.next() else { break };
            let line = line?;

            match parse_line(&line) {
                SessionInput::Quit => break,
                SessionInput::Empty => continue,
                SessionInput::Help => print_help(),
                SessionInput::Unknown(s) => warning(format!("Unknown command '{s}'")),
                SessionInput::Tap(code) => {
                    let result = session_tap(&mut repo, code, fix);
                    can_undo = result.is_ok() || can_undo;
                    report(result);
                }
                SessionInput::Undo if !can_undo => warning("Nothing to undo."),
                SessionInput::Undo => {
                    can_undo = false;
                    report(session_undo(&mut repo));
                }
                SessionInput::Photo(path) => report(session_photo(&mut repo, path)),
            }

            if board.refresh(&repo)?.is_some() {
                print!("{}", render_counts(board.buttons(), board.snapshot()));
            }
        }

        info(format!(
            "Session closed, {} event(s) stored.",
            board.snapshot().total
        ));
    }
    Ok(())
}

/// Errors inside a session are shown and the session goes on.
fn report(result: AppResult<()>) {
    if let Err(e) = result {
        error(e);
    }
}

fn session_tap(repo: &mut Repository, code: i32, fix: Fix) -> AppResult<()> {
    let ev = logger::tap(repo, code, fix)?;
    success(format!("#{} {}", ev.event_index, ev.event_name));
    ttlog_quiet(
        repo.conn(),
        "tap",
        &format!("event {}", ev.id),
        &format!("code={} index={}", ev.event_code, ev.event_index),
    );
    Ok(())
}

fn session_undo(repo: &mut Repository) -> AppResult<()> {
    let ev = logger::undo(repo)?.ok_or(AppError::NoEvents)?;
    success(format!("Removed #{} {}", ev.event_index, ev.event_name));
    ttlog_quiet(
        repo.conn(),
        "undo",
        &format!("event {}", ev.id),
        &format!("Removed {} logged at {}", ev.event_name, ev.timestamp),
    );
    Ok(())
}

fn session_photo(repo: &mut Repository, path: &str) -> AppResult<()> {
    let ev = logger::attach_photo(repo, path, None)?;
    success(format!("Photo attached to #{}", ev.event_index));
    ttlog_quiet(repo.conn(), "photo", &format!("event {}", ev.id), path);
    Ok(())
}

fn print_help() {
    println!("Type a button code to log an event, 'u' to undo, 'p <path>' to attach a photo, 'q' to quit.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_lines() {
        assert_eq!(parse_line(" 3 "), SessionInput::Tap(3));
        assert_eq!(parse_line("u"), SessionInput::Undo);
        assert_eq!(parse_line("p  /tmp/a.jpg"), SessionInput::Photo("/tmp/a.jpg"));
        assert_eq!(parse_line("q"), SessionInput::Quit);
        assert_eq!(parse_line(""), SessionInput::Empty);
        assert_eq!(parse_line("fox"), SessionInput::Unknown("fox"));
    }
}
