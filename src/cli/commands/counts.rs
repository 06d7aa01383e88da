use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::{CountBoard, CountSnapshot};
use crate::errors::AppResult;
use crate::models::event_button::EventButton;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Counts { json } = cmd {
        let repo = open_repo(cfg, true)?;
        let board = CountBoard::load(&repo)?;

        if *json {
            let out = serde_json::to_string_pretty(board.snapshot())?;
            println!("{out}");
            return Ok(());
        }

        print!("{}", render_counts(board.buttons(), board.snapshot()));
        if !board.snapshot().has_events() {
            info("No events logged yet.");
        }
    }
    Ok(())
}

/// One row per button (ordered by code) followed by the total.
pub(crate) fn render_counts(buttons: &[EventButton], snapshot: &CountSnapshot) -> String {
    let mut table = Table::new(vec![
        Column::new("CODE", 4),
        Column::new("BUTTON", 6),
        Column::new("COUNT", 5),
    ]);

    for b in buttons {
        table.add_row(vec![
            b.code.to_string(),
            b.name.clone(),
            snapshot.count_for(b.code).to_string(),
        ]);
    }

    table.fit();
    format!("{}TOTAL: {}\n", table.render(), snapshot.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn renders_rows_and_total() {
        let buttons = vec![
            EventButton::new(1, "Heron", 0xFFE53935),
            EventButton::new(2, "Otter", 0xFFFB8C00),
        ];
        let snapshot = CountSnapshot {
            counts: BTreeMap::from([(1, 3), (2, 0)]),
            total: 3,
        };

        let out = render_counts(&buttons, &snapshot);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "CODE BUTTON COUNT");
        assert_eq!(lines[1], "1    Heron  3");
        assert_eq!(lines[2], "2    Otter  0");
        assert_eq!(lines[3], "TOTAL: 3");
    }
}
