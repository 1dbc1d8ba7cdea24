mod execute;
mod output;

use clap::Args;

/// Count cells, distinct rows and distinct columns
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  db_table stats             # Sizes of the default relation
  db_table stats -t sessions -o json")]
pub struct StatsCmd {}
