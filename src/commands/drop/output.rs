//! Output formatting for drop command results.

use super::execute::DropResult;
use crate::output::Outputable;

impl Outputable for DropResult {
    fn to_table(&self) -> String {
        format!(
            "Dropped table {} ({} cell(s)).",
            self.table, self.removed
        )
    }
}
