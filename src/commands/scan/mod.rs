mod execute;
mod output;

use clap::Args;

/// List the cells of one row, one column, or the whole table
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  db_table scan                 # Every cell, ordered by row then column
  db_table scan -r user:1       # Cells of one row
  db_table scan -c email        # Cells of one column
  db_table scan -l 10 -o toon   # First 10 cells as toon")]
pub struct ScanCmd {
    /// Only cells of this row
    #[arg(short, long, conflicts_with = "column")]
    pub row: Option<String>,

    /// Only cells of this column
    #[arg(short, long)]
    pub column: Option<String>,

    /// Maximum number of cells to show (1-10000)
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=10000))]
    pub limit: u32,
}
