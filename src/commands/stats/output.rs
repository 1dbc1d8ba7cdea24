//! Output formatting for stats command results.

use super::execute::StatsResult;
use crate::output::Outputable;

impl Outputable for StatsResult {
    fn to_table(&self) -> String {
        format!(
            "Table: {}\n\nCells:   {}\nRows:    {}\nColumns: {}",
            self.table, self.cells, self.rows, self.columns
        )
    }
}
