mod execute;
mod output;

use clap::Args;

/// Store a value at (row, column), replacing any existing one
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  db_table put -r user:1 -c email -v a@b.c   # Insert or replace one cell
  db_table put -r user:1 -c email -v x -o json")]
pub struct PutCmd {
    /// Row key
    #[arg(short, long)]
    pub row: String,

    /// Column key
    #[arg(short, long)]
    pub column: String,

    /// Value to store
    #[arg(short, long)]
    pub value: String,
}
