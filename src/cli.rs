//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;
use crate::output::OutputFormat;

/// Relation opened when neither `--table` nor the config file names one.
pub const DEFAULT_TABLE: &str = "db_table";

#[derive(Parser, Debug)]
#[command(name = "db_table")]
#[command(about = "Inspect and edit (row, column, value) tables stored in SQLite or PostgreSQL")]
pub struct Args {
    /// Database location: file path, sqlite://, postgres:// URL or :memory:
    /// (defaults to .db_table.json, then DATABASE_URL/DB_TABLE_PATH)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Relation holding the table
    #[arg(short, long, global = true)]
    pub table: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Relation name: `--table`, then the config file's, then the default.
    pub fn table_name(&self, configured: Option<&str>) -> String {
        self.table
            .as_deref()
            .or(configured)
            .unwrap_or(DEFAULT_TABLE)
            .to_string()
    }
}
