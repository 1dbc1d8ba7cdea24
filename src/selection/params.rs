//! Parameter naming for rendered selections.
//!
//! One `ParamNamer` lives for exactly one render call, so every placeholder in
//! a statement gets a distinct name even when two combined selections
//! constrain the same column.

use std::collections::HashMap;

use crate::db::{DataValue, Params};

#[derive(Debug, Default)]
pub struct ParamNamer {
    counters: HashMap<String, usize>,
    params: Params,
}

impl ParamNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an equality value, preferring the bare column name.
    ///
    /// Returns the placeholder including the leading `:`.
    pub fn bind_scalar(&mut self, column: &str, value: DataValue) -> String {
        if self.params.contains_key(column) {
            return self.bind_element(column, value);
        }
        self.params.insert(column.to_string(), value);
        format!(":{column}")
    }

    /// Bind one element of a value set as `column_<n>`.
    pub fn bind_element(&mut self, column: &str, value: DataValue) -> String {
        let counter = self.counters.entry(column.to_string()).or_insert(0);
        loop {
            let name = format!("{column}_{counter}");
            *counter += 1;
            if !self.params.contains_key(&name) {
                let placeholder = format!(":{name}");
                self.params.insert(name, value);
                return placeholder;
            }
        }
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(s: &str) -> DataValue {
        DataValue::Bytes(s.as_bytes().to_vec())
    }

    #[test]
    fn test_scalar_uses_column_name() {
        let mut namer = ParamNamer::new();
        assert_eq!(namer.bind_scalar("row_field", blob("r")), ":row_field");
        let params = namer.into_params();
        assert_eq!(params.get("row_field"), Some(&blob("r")));
    }

    #[test]
    fn test_second_scalar_on_same_column_is_suffixed() {
        let mut namer = ParamNamer::new();
        assert_eq!(namer.bind_scalar("row_field", blob("a")), ":row_field");
        assert_eq!(namer.bind_scalar("row_field", blob("b")), ":row_field_0");
        assert_eq!(namer.into_params().len(), 2);
    }

    #[test]
    fn test_elements_count_per_column() {
        let mut namer = ParamNamer::new();
        assert_eq!(namer.bind_element("row_field", blob("a")), ":row_field_0");
        assert_eq!(namer.bind_element("column_field", blob("b")), ":column_field_0");
        assert_eq!(namer.bind_element("row_field", blob("c")), ":row_field_1");
    }

    #[test]
    fn test_suffix_skips_names_already_taken() {
        let mut namer = ParamNamer::new();
        namer.bind_scalar("x_0", blob("taken"));
        assert_eq!(namer.bind_element("x", blob("a")), ":x_1");
    }
}
