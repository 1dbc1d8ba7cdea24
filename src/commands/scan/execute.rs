use std::error::Error;

use serde::Serialize;

use super::ScanCmd;
use crate::commands::Execute;
use crate::output::display_bytes;
use crate::table::DbTable;
use crate::types::{Bytes, Cell};

/// One cell of a scan, rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedCell {
    pub row: String,
    pub column: String,
    pub value: String,
}

impl From<Cell<Bytes, Bytes, Bytes>> for ScannedCell {
    fn from(cell: Cell<Bytes, Bytes, Bytes>) -> Self {
        Self {
            row: display_bytes(&cell.row),
            column: display_bytes(&cell.column),
            value: display_bytes(&cell.value),
        }
    }
}

/// Result of the scan command execution
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub total: usize,
    pub cells: Vec<ScannedCell>,
}

impl Execute for ScanCmd {
    type Output = ScanResult;

    fn execute(self, table: &mut DbTable) -> Result<Self::Output, Box<dyn Error>> {
        let cells: Vec<Cell<Bytes, Bytes, Bytes>> = match (&self.row, &self.column) {
            (Some(row), _) => table
                .row(row.as_bytes())
                .iter()?
                .map(|entry| Cell::new(row.as_bytes().to_vec(), entry.key, entry.value))
                .collect(),
            (None, Some(column)) => table
                .column(column.as_bytes())
                .iter()?
                .map(|entry| Cell::new(entry.key, column.as_bytes().to_vec(), entry.value))
                .collect(),
            (None, None) => table.cell_set().iter()?.collect(),
        };

        let total = cells.len();
        let cells = cells
            .into_iter()
            .take(self.limit as usize)
            .map(ScannedCell::from)
            .collect();

        Ok(ScanResult {
            table: table.name().to_string(),
            row: self.row,
            column: self.column,
            total,
            cells,
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
        table_with(&[
            ("r2", "a", "3"),
            ("r1", "b", "2"),
            ("r1", "a", "1"),
            ("r3", "c", "4"),
        ])
    }

    fn scan(row: Option<&str>, column: Option<&str>, limit: u32) -> ScanCmd {
        ScanCmd {
            row: row.map(str::to_string),
            column: column.map(str::to_string),
            limit,
        }
    }

    fn triples(result: &ScanResult) -> Vec<(&str, &str, &str)> {
        result
            .cells
            .iter()
            .map(|c| (c.row.as_str(), c.column.as_str(), c.value.as_str()))
            .collect()
    }

    #[rstest]
    fn test_scan_all_is_ordered(mut table: DbTable) {
        let result = execute_cmd(scan(None, None, 100), &mut table).unwrap();
        assert_eq!(result.total, 4);
        assert_eq!(
            triples(&result),
            vec![("r1", "a", "1"), ("r1", "b", "2"), ("r2", "a", "3"), ("r3", "c", "4")]
        );
    }

    #[rstest]
    fn test_scan_row(mut table: DbTable) {
        let result = execute_cmd(scan(Some("r1"), None, 100), &mut table).unwrap();
        assert_eq!(triples(&result), vec![("r1", "a", "1"), ("r1", "b", "2")]);
    }

    #[rstest]
    fn test_scan_column(mut table: DbTable) {
        let result = execute_cmd(scan(None, Some("a"), 100), &mut table).unwrap();
        assert_eq!(triples(&result), vec![("r1", "a", "1"), ("r2", "a", "3")]);
    }

    #[rstest]
    fn test_scan_limit_keeps_total(mut table: DbTable) {
        let result = execute_cmd(scan(None, None, 2), &mut table).unwrap();
        assert_eq!(result.total, 4);
        assert_eq!(result.cells.len(), 2);
    }

    #[rstest]
    fn test_scan_missing_row(mut table: DbTable) {
        let result = execute_cmd(scan(Some("r9"), None, 100), &mut table).unwrap();
        assert_eq!(result.total, 0);
        assert!(result.cells.is_empty());
    }
}
