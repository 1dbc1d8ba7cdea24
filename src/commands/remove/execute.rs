use std::error::Error;

use serde::Serialize;

use super::RemoveCmd;
use crate::commands::Execute;
use crate::output::display_bytes;
use crate::table::DbTable;

/// Result of the remove command execution
#[derive(Debug, Default, Serialize)]
pub struct RemoveResult {
    pub table: String,
    pub row: String,
    pub column: String,
    pub removed: Option<String>,
}

impl Execute for RemoveCmd {
    type Output = RemoveResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        let removed = table.remove(self.row.as_bytes(), self.column.as_bytes())?;

        Ok(RemoveResult {
            table: table.name().to_string(),
            row: self.row,
            column: self.column,
            removed: removed.as_deref().map(display_bytes),
        })
    }
}
