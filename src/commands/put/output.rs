//! Output formatting for put command results.

use super::execute::PutResult;
use crate::output::Outputable;

impl Outputable for PutResult {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!("Table: {}", self.table),
            String::new(),
            format!("Stored ({}, {}) = {}", self.row, self.column, self.value),
        ];
        match &self.previous {
            Some(previous) => lines.push(format!("Replaced: {previous}")),
            None => lines.push("New cell.".to_string()),
        }
        lines.join("\n")
    }
}
