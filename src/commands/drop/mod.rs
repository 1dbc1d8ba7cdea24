mod execute;
mod output;

use clap::Args;

/// Drop the relation and everything stored in it
#[derive(Args, Debug)]
pub struct DropCmd {}
