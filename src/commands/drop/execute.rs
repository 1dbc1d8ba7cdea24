use std::error::Error;

use serde::Serialize;

use super::DropCmd;
use crate::commands::Execute;
use crate::table::DbTable;

/// Result of the drop command execution
#[derive(Debug, Default, Serialize)]
pub struct DropResult {
    pub table: String,
    pub removed: usize,
}

impl Execute for DropCmd {
    type Output = DropResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        let removed = table.size()?;
        table.drop_relation()?;
        Ok(DropResult {
            table: table.name().to_string(),
            removed,
        })
    }
}
