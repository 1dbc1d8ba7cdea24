//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a serializable result
//! - An `Outputable` impl rendering that result as a table

mod clear;
mod drop;
mod get;
mod put;
mod remove;
mod scan;
mod stats;

pub use clear::ClearCmd;
pub use drop::DropCmd;
pub use get::GetCmd;
pub use put::PutCmd;
pub use remove::RemoveCmd;
pub use scan::ScanCmd;
pub use stats::StatsCmd;

use clap::Subcommand;
use std::error::Error;

use crate::output::{OutputFormat, Outputable};
use crate::table::DbTable;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read the value stored at (row, column)
    Get(GetCmd),

    /// Store a value at (row, column)
    Put(PutCmd),

    /// Delete the value stored at (row, column)
    Remove(RemoveCmd),

    /// List the cells of one row, one column, or the whole table
    Scan(ScanCmd),

    /// Count cells, distinct rows and distinct columns
    Stats(StatsCmd),

    /// Delete every cell, keeping the relation
    Clear(ClearCmd),

    /// Drop the relation
    Drop(DropCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, table: &mut DbTable, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Get(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
            Command::Put(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
            Command::Remove(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
            Command::Scan(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
            Command::Stats(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
            Command::Clear(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
            Command::Drop(cmd) => {
                let result = cmd.execute(table)?;
                Ok(result.format(format))
            }
        }
    }
}
