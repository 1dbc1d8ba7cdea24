use std::error::Error;

use serde::Serialize;

use super::ClearCmd;
use crate::commands::Execute;
use crate::table::DbTable;

/// Result of the clear command execution
#[derive(Debug, Default, Serialize)]
pub struct ClearResult {
    pub table: String,
    pub removed: usize,
}

impl Execute for ClearCmd {
    type Output = ClearResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        let removed = table.size()?;
        table.clear()?;
        Ok(ClearResult {
            table: table.name().to_string(),
            removed,
        })
    }
}
