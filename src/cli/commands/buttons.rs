use crate::cli::commands::{ask_confirmation, open_repo};
use crate::cli::parser::{ButtonAction, Commands};
use crate::config::Config;
use crate::core::logger;
use crate::core::repository::Repository;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::event_button::EventButton;
use crate::ui::messages::{colors_enabled, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Buttons { action } = cmd {
        let mut repo = open_repo(cfg, true)?;

        match action {
            ButtonAction::List => {
                print_buttons(&repo.buttons()?);
            }
            ButtonAction::Add { name, color } => {
                let b = logger::add_button(&mut repo, name, color.as_deref())?;
                success(format!("Button {} '{}' added ({})", b.code, b.name, b.color_hex()));
                audit(&repo, &b, "added");
            }
            ButtonAction::Rename { code, name } => {
                let b = logger::rename_button(&mut repo, *code, name)?;
                success(format!("Button {} renamed to '{}'", b.code, b.name));
                audit(&repo, &b, "renamed");
            }
            ButtonAction::Color { code, color } => {
                let b = logger::recolor_button(&mut repo, *code, color)?;
                success(format!("Button {} colour set to {}", b.code, b.color_hex()));
                audit(&repo, &b, "recoloured");
            }
            ButtonAction::Remove { code } => {
                let b = logger::remove_button(&mut repo, *code)?;
                success(format!(
                    "Button {} '{}' removed (its events are kept)",
                    b.code, b.name
                ));
                audit(&repo, &b, "removed");
            }
            ButtonAction::Reset { yes } => {
                if !*yes
                    && !ask_confirmation("Delete every button and restore the six defaults?")
                {
                    info("Operation cancelled.");
                    return Ok(());
                }
                repo.reset_default_buttons()?;
                success(format!(
                    "Buttons reset to defaults ({})",
                    repo.button_count()?
                ));
                ttlog_quiet(repo.conn(), "buttons", "all", "reset to defaults");
            }
        }
    }
    Ok(())
}

fn audit(repo: &Repository, b: &EventButton, what: &str) {
    ttlog_quiet(
        repo.conn(),
        "buttons",
        &format!("code {}", b.code),
        &format!("{} '{}' {}", what, b.name, b.color_hex()),
    );
}

fn print_buttons(buttons: &[EventButton]) {
    if buttons.is_empty() {
        info("No buttons defined.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("CODE", 4),
        Column::new("NAME", 4),
        Column::new("COLOUR", 6),
    ]);
    for b in buttons {
        table.add_row(vec![b.code.to_string(), b.name.clone(), b.color_hex()]);
    }
    table.fit();

    // swatches are printed outside the table so widths stay exact
    let rendered = table.render();
    let mut lines = rendered.lines();
    if let Some(header) = lines.next() {
        println!("   {header}");
    }
    for (b, line) in buttons.iter().zip(lines) {
        let swatch = if colors_enabled() {
            b.swatch()
        } else {
            "  ".to_string()
        };
        println!("{swatch} {line}");
    }
}
