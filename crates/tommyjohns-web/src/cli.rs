//! Command line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tommyjohns", version, about = "Tommy John surgery statistics")]
pub struct Cli {
    /// Settings file (default: $TOMMYJOHNS_SETTINGS_FILE, then ./tommyjohns.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter overriding the settings file, e.g. `debug`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Initialize the database, build the charts, and serve HTTP (default)
    Serve,
    /// Build the chart fragments and exit
    BuildCharts,
    /// Apply the database schema and exit
    InitDb,
    /// Fetch a spreadsheet's title and values and log them
    ImportSheet {
        /// Spreadsheet id (default: `sheets.sheet_id`)
        #[arg(long)]
        sheet_id: Option<String>,
        /// A1 range (default: `sheets.range`)
        #[arg(long)]
        range: Option<String>,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
