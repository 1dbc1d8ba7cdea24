use std::error::Error;

use serde::Serialize;

use super::StatsCmd;
use crate::commands::Execute;
use crate::table::DbTable;

/// Result of the stats command execution
#[derive(Debug, Default, Serialize)]
pub struct StatsResult {
    pub table: String,
    pub cells: usize,
    pub rows: usize,
    pub columns: usize,
}

impl Execute for StatsCmd {
    type Output = StatsResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        Ok(StatsResult {
            table: table.name().to_string(),
            cells: table.size()?,
            rows: table.row_key_set().size()?,
            columns: table.column_key_set().size()?,
        })
    }
}
