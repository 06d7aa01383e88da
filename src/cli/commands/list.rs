use crate::cli::commands::open_repo;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::events::EventOrder;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::ui::messages::info;
use crate::utils::formatting::{accuracy, coordinate, short_time, truncate};
use crate::utils::table::{Column, Table};

const NOTE_MAX: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        latest,
        limit,
        json,
    } = cmd
    {
        let repo = open_repo(cfg, false)?;

        let order = if *latest {
            EventOrder::Latest
        } else {
            EventOrder::Newest
        };
        let mut events = repo.events(order)?;
        if let Some(n) = limit {
            events.truncate(*n);
        }

        if *json {
            let out = serde_json::to_string_pretty(&events)?;
            println!("{out}");
            return Ok(());
        }

        if events.is_empty() {
            info("No events logged yet.");
            return Ok(());
        }

        print!("{}", render_events(&events, cfg.coordinate_precision));
        println!("\n{} event(s)", events.len());
    }
    Ok(())
}

fn render_events(events: &[Event], precision: usize) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 2),
        Column::new("#", 1),
        Column::new("EVENT", 5),
        Column::new("CODE", 4),
        Column::new("DATE", 10),
        Column::new("TIME", 8),
        Column::new("LAT", 3),
        Column::new("LON", 3),
        Column::new("ACC", 3),
        Column::new("PH", 2),
        Column::new("NOTE", 4),
    ]);

    for ev in events {
        let date = ev
            .parsed_timestamp()
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        table.add_row(vec![
            ev.id.to_string(),
            ev.event_index.to_string(),
            ev.event_name.clone(),
            ev.event_code.to_string(),
            date,
            short_time(&ev.timestamp).to_string(),
            coordinate(ev.latitude, precision),
            coordinate(ev.longitude, precision),
            accuracy(ev.accuracy),
            ev.photo_paths.len().to_string(),
            truncate(&ev.note, NOTE_MAX),
        ]);
    }

    table.fit();
    table.render()
}
