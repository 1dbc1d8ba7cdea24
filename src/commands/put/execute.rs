use std::error::Error;

use serde::Serialize;

use super::PutCmd;
use crate::commands::Execute;
use crate::output::display_bytes;
use crate::table::DbTable;

/// Result of the put command execution
#[derive(Debug, Default, Serialize)]
pub struct PutResult {
    pub table: String,
    pub row: String,
    pub column: String,
    pub value: String,
    pub previous: Option<String>,
}

impl Execute for PutCmd {
    type Output = PutResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        let previous = table.put(
            self.row.as_bytes(),
            self.column.as_bytes(),
            self.value.as_bytes(),
        )?;

        Ok(PutResult {
            table: table.name().to_string(),
            row: self.row,
            column: self.column,
            value: self.value,
            previous: previous.as_deref().map(display_bytes),
        })
    }
}
