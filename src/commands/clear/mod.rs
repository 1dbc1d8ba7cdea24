mod execute;
mod output;

use clap::Args;

/// Delete every cell, keeping the relation
#[derive(Args, Debug)]
pub struct ClearCmd {}
