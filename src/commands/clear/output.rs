//! Output formatting for clear command results.

use super::execute::ClearResult;
use crate::output::Outputable;

impl Outputable for ClearResult {
    fn to_table(&self) -> String {
        format!("Table: {}\n\nRemoved {} cell(s).", self.table, self.removed)
    }
}
