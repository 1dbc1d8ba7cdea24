use std::error::Error;

use serde::Serialize;

use super::GetCmd;
use crate::commands::Execute;
use crate::output::display_bytes;
use crate::table::DbTable;

/// Result of the get command execution
#[derive(Debug, Default, Serialize)]
pub struct GetResult {
    pub table: String,
    pub row: String,
    pub column: String,
    pub value: Option<String>,
}

impl Execute for GetCmd {
    type Output = GetResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        let value = table.get(self.row.as_bytes(), self.column.as_bytes())?;

        Ok(GetResult {
            table: table.name().to_string(),
            row: self.row,
            column: self.column,
            value: value.as_deref().map(display_bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{execute_cmd, table_with};
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> DbTable {
        table_with(&[("r1", "a", "1"), ("r1", "b", "2")])
    }

    fn get(row: &str, column: &str) -> GetCmd {
        GetCmd {
            row: row.to_string(),
            column: column.to_string(),
        }
    }

    #[rstest]
    fn test_get_existing(mut table: DbTable) {
        let result = execute_cmd(get("r1", "b"), &mut table).unwrap();
        assert_eq!(result.table, "cells");
        assert_eq!(result.value.as_deref(), Some("2"));
    }

    #[rstest]
    #[case("r1", "z")]
    #[case("r9", "a")]
    fn test_get_missing(mut table: DbTable, #[case] row: &str, #[case] column: &str) {
        let result = execute_cmd(get(row, column), &mut table).unwrap();
        assert!(result.value.is_none());
    }

    #[rstest]
    fn test_get_binary_value_shown_as_hex(mut table: DbTable) {
        table.put(b"bin", b"c", &[0xff, 0xfe]).unwrap();
        let result = execute_cmd(get("bin", "c"), &mut table).unwrap();
        assert_eq!(result.value.as_deref(), Some("0xfffe"));
    }

    #[rstest]
    fn test_get_on_closed_table_fails(mut table: DbTable) {
        table.close().unwrap();
        assert!(execute_cmd(get("r1", "a"), &mut table).is_err());
    }
}
