//! Output formatting for get command results.

use super::execute::GetResult;
use crate::output::Outputable;

impl Outputable for GetResult {
    fn to_table(&self) -> String {
        let cell = format!("({}, {})", self.row, self.column);
        match &self.value {
            Some(value) => format!("Table: {}\n\n{} = {}", self.table, cell, value),
            None => format!("Table: {}\n\nNo value at {}.", self.table, cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const FOUND_TABLE: &str = "\
Table: cells

(r1, a) = hello";

    const MISSING_TABLE: &str = "\
Table: cells

No value at (r1, z).";

    #[fixture]
    fn found_result() -> GetResult {
        GetResult {
            table: "cells".to_string(),
            row: "r1".to_string(),
            column: "a".to_string(),
            value: Some("hello".to_string()),
        }
    }

    #[fixture]
    fn missing_result() -> GetResult {
        GetResult {
            table: "cells".to_string(),
            row: "r1".to_string(),
            column: "z".to_string(),
            value: None,
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_found,
        fixture: found_result,
        fixture_type: GetResult,
        expected: FOUND_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_missing,
        fixture: missing_result,
        fixture_type: GetResult,
        expected: MISSING_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: found_result,
        fixture_type: GetResult,
        assertions: {
            "table": "cells",
            "row": "r1",
            "value": "hello",
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_missing_is_null,
        fixture: missing_result,
        fixture_type: GetResult,
        assertions: {
            "value": serde_json::Value::Null,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: found_result,
        fixture_type: GetResult,
        contains: ["row: r1", "column: a", "value: hello"],
    }
}
