use clap::{Parser, Subcommand};

/// Coordinates must be real numbers: `NaN` and infinities are refused.
fn finite_f64(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("'{s}' is not a finite number")),
        Err(e) => Err(e.to_string()),
    }
}

fn finite_f32(s: &str) -> Result<f32, String> {
    match s.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("'{s}' is not a finite number")),
        Err(e) => Err(e.to_string()),
    }
}

/// Command-line interface definition for fieldlogger
/// CLI application to log geotagged field events with SQLite
#[derive(Parser)]
#[command(
    name = "fieldlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log timestamped, geotagged field events by button code and export them as CSV",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, the configuration and the default buttons
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log one event for a button
    Tap {
        /// Button code
        code: i32,

        #[arg(long = "lat", allow_hyphen_values = true, value_parser = finite_f64, help = "Latitude of the current fix")]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true, value_parser = finite_f64, help = "Longitude of the current fix")]
        lon: Option<f64>,

        #[arg(long = "acc", value_parser = finite_f32, help = "Accuracy of the current fix, in metres")]
        acc: Option<f32>,
    },

    /// Remove the most recent event
    Undo,

    /// Attach a photo reference to an event (default: the most recent one)
    Photo {
        /// Path of the photo file
        path: String,

        #[arg(long = "event", help = "Event id to attach the photo to")]
        event: Option<i64>,
    },

    /// Review logged events
    List {
        #[arg(long = "latest", help = "Order by timestamp instead of insertion")]
        latest: bool,

        #[arg(long, short = 'n', help = "Show at most N events")]
        limit: Option<usize>,

        #[arg(long = "json", help = "Print events as JSON")]
        json: bool,
    },

    /// Edit an event. Malformed numbers keep the previous value.
    Edit {
        /// Event id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long)]
        code: Option<String>,

        #[arg(long = "lat", allow_hyphen_values = true)]
        lat: Option<String>,

        #[arg(long = "lon", allow_hyphen_values = true)]
        lon: Option<String>,

        #[arg(long = "acc", allow_hyphen_values = true, help = "Accuracy in metres (empty clears it)")]
        acc: Option<String>,
    },

    /// Delete one event, or all of them
    Del {
        /// Event id
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<i64>,

        #[arg(long = "all", help = "Delete every event")]
        all: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage event buttons
    Buttons {
        #[command(subcommand)]
        action: ButtonAction,
    },

    /// Show per-button event counts and the total
    Counts {
        #[arg(long = "json", help = "Print counts as JSON")]
        json: bool,
    },

    /// Export all events as CSV
    Export {
        #[arg(long, value_name = "FILE", help = "File name (default: fieldlogger_export_<timestamp>.csv)")]
        file: Option<String>,

        #[arg(long = "share", help = "Write a shareable copy into the share folder")]
        share: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Interactive logging: type a button code per line
    Session {
        #[arg(long = "lat", allow_hyphen_values = true, value_parser = finite_f64, help = "Latitude used for every tap")]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true, value_parser = finite_f64, help = "Longitude used for every tap")]
        lon: Option<f64>,

        #[arg(long = "acc", value_parser = finite_f32, help = "Accuracy used for every tap, in metres")]
        acc: Option<f32>,
    },
}

#[derive(Subcommand)]
pub enum ButtonAction {
    /// List buttons ordered by code
    List,

    /// Add a button (code = highest code + 1)
    Add {
        name: String,

        #[arg(long, help = "Colour as #RRGGBB or #AARRGGBB (default: next palette colour)")]
        color: Option<String>,
    },

    /// Rename a button
    Rename { code: i32, name: String },

    /// Change a button colour
    Color { code: i32, color: String },

    /// Remove a button (its events are kept)
    Remove { code: i32 },

    /// Delete every button and restore the six defaults
    Reset {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
