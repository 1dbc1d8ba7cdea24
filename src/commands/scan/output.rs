//! Output formatting for scan command results.

use super::execute::ScanResult;
use crate::output::Outputable;

impl Outputable for ScanResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        let filter = match (&self.row, &self.column) {
            (Some(row), _) => format!(" (row {row})"),
            (None, Some(column)) => format!(" (column {column})"),
            (None, None) => String::new(),
        };
        lines.push(format!("Table: {}{}", self.table, filter));
        lines.push(String::new());

        if self.cells.is_empty() {
            lines.push("No cells found.".to_string());
            return lines.join("\n");
        }

        if self.cells.len() < self.total {
            lines.push(format!("Showing {} of {} cell(s):", self.cells.len(), self.total));
        } else {
            lines.push(format!("Found {} cell(s):", self.total));
        }

        let row_width = self.cells.iter().map(|c| c.row.len()).max().unwrap_or(0);
        let column_width = self.cells.iter().map(|c| c.column.len()).max().unwrap_or(0);
        for cell in &self.cells {
            lines.push(format!(
                "  {:row_width$}  {:column_width$}  {}",
                cell.row, cell.column, cell.value
            ));
        }

        lines.join("\n")
    }
}
