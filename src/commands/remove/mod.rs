mod execute;
mod output;

use clap::Args;

/// Delete the value stored at (row, column)
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  db_table remove -r user:1 -c email   # Delete one cell")]
pub struct RemoveCmd {
    /// Row key
    #[arg(short, long)]
    pub row: String,

    /// Column key
    #[arg(short, long)]
    pub column: String,
}
