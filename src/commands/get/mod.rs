mod cli_tests;
mod execute;
mod output;

use clap::Args;

/// Read the value stored at (row, column)
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  db_table get -r user:1 -c email            # Value of one cell
  db_table get -r user:1 -c email -o json    # As JSON
  db_table get -t sessions -r abc -c expiry  # From another relation")]
pub struct GetCmd {
    /// Row key
    #[arg(short, long)]
    pub row: String,

    /// Column key
    #[arg(short, long)]
    pub column: String,
}
