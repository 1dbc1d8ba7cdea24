//! Output formatting for remove command results.

use super::execute::RemoveResult;
use crate::output::Outputable;

impl Outputable for RemoveResult {
    fn to_table(&self) -> String {
        let cell = format!("({}, {})", self.row, self.column);
        match &self.removed {
            Some(value) => format!("Table: {}\n\nRemoved {} = {}", self.table, cell, value),
            None => format!("Table: {}\n\nNo value at {}.", self.table, cell),
        }
    }
}
