//! Selections: which rows of a relation are in scope.
//!
//! A `Selection` is an immutable conjunction of per-column constraints. It
//! renders to a `WHERE` fragment plus the parameter map binding every value;
//! values never appear in the SQL text.
//!
//! ```text
//! (row_field = :row_field AND column_field IN (:column_field_0, :column_field_1))
//! ```
//!
//! Combining two selections with [`Selection::and`] produces a new selection.
//! Parameter names are assigned at render time by a [`ParamNamer`] scoped to
//! that one render, so combined selections over the same column never collide.

mod factory;
mod params;

pub use factory::{CellSelection, EntrySelection, FieldSelection, PairSelection, SelectionFactory};
pub use params::ParamNamer;

use crate::db::{DataValue, DbError, Dialect, Params};

/// Constraint on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Equals(DataValue),
    OneOf(Vec<DataValue>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Column {
        column: String,
        constraint: Constraint,
    },
    /// Row-value membership: `(c1, c2) IN (...)`.
    Tuple {
        columns: Vec<String>,
        rows: Vec<Vec<DataValue>>,
    },
}

/// An immutable conjunction of column constraints. Empty means every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    conditions: Vec<Condition>,
}

/// SQL fragment and the parameters it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSelection {
    pub sql: String,
    pub params: Params,
}

impl Selection {
    /// The universal selection.
    pub fn all() -> Self {
        Self::default()
    }

    /// `column = value`
    pub fn equals(column: &str, value: DataValue) -> Self {
        Self::column(column, Constraint::Equals(value))
    }

    /// `column IN (values...)`; an empty set matches nothing.
    pub fn one_of(column: &str, values: Vec<DataValue>) -> Self {
        Self::column(column, Constraint::OneOf(values))
    }

    fn column(column: &str, constraint: Constraint) -> Self {
        Self {
            conditions: vec![Condition::Column {
                column: column.to_string(),
                constraint,
            }],
        }
    }

    /// Membership of the column tuple in a set of value tuples.
    ///
    /// Every row must have one value per column. A single column degrades to
    /// [`Selection::one_of`].
    pub fn one_of_tuples(columns: &[String], rows: Vec<Vec<DataValue>>) -> Result<Self, DbError> {
        if columns.is_empty() {
            return Err(DbError::TypeMismatch {
                expected: "at least one key column",
                found: "none",
            });
        }
        if rows.iter().any(|row| row.len() != columns.len()) {
            return Err(DbError::TypeMismatch {
                expected: "one value per key column",
                found: "tuple of a different arity",
            });
        }

        if let [column] = columns {
            let values = rows.into_iter().flatten().collect();
            return Ok(Self::one_of(column, values));
        }

        Ok(Self {
            conditions: vec![Condition::Tuple {
                columns: columns.to_vec(),
                rows,
            }],
        })
    }

    /// Conjunction of `self` and `other` as a new selection.
    pub fn and(&self, other: &Selection) -> Selection {
        let mut conditions = self.conditions.clone();
        conditions.extend(other.conditions.iter().cloned());
        Selection { conditions }
    }

    /// True when the selection matches every row.
    pub fn is_universal(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Column values fixed by equality constraints, keyed by column name.
    ///
    /// This is what an upsert binds. A selection containing set constraints
    /// does not pin a single row and cannot be written through.
    pub fn bindings(&self) -> Result<Params, DbError> {
        let mut params = Params::new();
        for condition in &self.conditions {
            match condition {
                Condition::Column {
                    column,
                    constraint: Constraint::Equals(value),
                } => {
                    params.insert(column.clone(), value.clone());
                }
                _ => {
                    return Err(DbError::Unsupported {
                        operation: "write through a set-valued selection",
                    });
                }
            }
        }
        Ok(params)
    }

    /// Render for SQLite.
    pub fn render(&self) -> RenderedSelection {
        self.render_for(Dialect::Sqlite)
    }

    /// Render with a fresh parameter namer.
    pub fn render_for(&self, dialect: Dialect) -> RenderedSelection {
        let mut namer = ParamNamer::new();
        let sql = self.render_with(dialect, &mut namer);
        RenderedSelection {
            sql,
            params: namer.into_params(),
        }
    }

    /// Render into an existing namer, for statements that combine several
    /// selections in one parameter space.
    pub fn render_with(&self, dialect: Dialect, namer: &mut ParamNamer) -> String {
        if self.conditions.is_empty() {
            return format!("({})", dialect.true_literal());
        }

        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|condition| render_condition(condition, dialect, namer))
            .collect();
        format!("({})", parts.join(" AND "))
    }
}

fn render_condition(condition: &Condition, dialect: Dialect, namer: &mut ParamNamer) -> String {
    match condition {
        Condition::Column {
            column,
            constraint: Constraint::Equals(value),
        } => {
            let placeholder = namer.bind_scalar(column, value.clone());
            format!("{column} = {placeholder}")
        }
        Condition::Column {
            constraint: Constraint::OneOf(values),
            ..
        } if values.is_empty() => dialect.false_literal().to_string(),
        Condition::Column {
            column,
            constraint: Constraint::OneOf(values),
        } => {
            let placeholders: Vec<String> = values
                .iter()
                .map(|v| namer.bind_element(column, v.clone()))
                .collect();
            format!("{column} IN ({})", placeholders.join(", "))
        }
        Condition::Tuple { rows, .. } if rows.is_empty() => dialect.false_literal().to_string(),
        Condition::Tuple { columns, rows } => {
            let tuples: Vec<String> = rows
                .iter()
                .map(|row| {
                    let placeholders: Vec<String> = columns
                        .iter()
                        .zip(row)
                        .map(|(column, v)| namer.bind_element(column, v.clone()))
                        .collect();
                    format!("({})", placeholders.join(", "))
                })
                .collect();
            // SQLite only accepts a subquery on the right of a row-value IN.
            let list = match dialect {
                Dialect::Sqlite => format!("VALUES {}", tuples.join(", ")),
                Dialect::Postgres => tuples.join(", "),
            };
            format!("({}) IN ({list})", columns.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn blob(s: &str) -> DataValue {
        DataValue::Bytes(s.as_bytes().to_vec())
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(Dialect::Sqlite, "(1)")]
    #[case(Dialect::Postgres, "(TRUE)")]
    fn test_empty_selection_is_true_literal(#[case] dialect: Dialect, #[case] expected: &str) {
        let rendered = Selection::all().render_for(dialect);
        assert_eq!(rendered.sql, expected);
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn test_equality() {
        let rendered = Selection::equals("row_field", blob("r")).render();
        assert_eq!(rendered.sql, "(row_field = :row_field)");
        assert_eq!(rendered.params.get("row_field"), Some(&blob("r")));
    }

    #[test]
    fn test_conjunction() {
        let sel = Selection::equals("row_field", blob("r"))
            .and(&Selection::one_of("column_field", vec![blob("a"), blob("b")]));
        let rendered = sel.render();
        assert_eq!(
            rendered.sql,
            "(row_field = :row_field AND column_field IN (:column_field_0, :column_field_1))"
        );
        assert_eq!(rendered.params.len(), 3);
    }

    #[rstest]
    #[case(Dialect::Sqlite, "(0)")]
    #[case(Dialect::Postgres, "(FALSE)")]
    fn test_empty_set_matches_nothing(#[case] dialect: Dialect, #[case] expected: &str) {
        let rendered = Selection::one_of("row_field", vec![]).render_for(dialect);
        assert_eq!(rendered.sql, expected);
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn test_combined_sets_on_same_column_do_not_collide() {
        let a = Selection::one_of("row_field", vec![blob("a"), blob("b")]);
        let b = Selection::one_of("row_field", vec![blob("c")]);
        let rendered = a.and(&b).render();
        assert_eq!(
            rendered.sql,
            "(row_field IN (:row_field_0, :row_field_1) AND row_field IN (:row_field_2))"
        );
        assert_eq!(rendered.params.get("row_field_2"), Some(&blob("c")));
    }

    #[test]
    fn test_combined_equalities_on_same_column_do_not_collide() {
        let sel = Selection::equals("row_field", blob("a")).and(&Selection::equals("row_field", blob("b")));
        let rendered = sel.render();
        assert_eq!(rendered.sql, "(row_field = :row_field AND row_field = :row_field_0)");
        assert_eq!(rendered.params.get("row_field"), Some(&blob("a")));
        assert_eq!(rendered.params.get("row_field_0"), Some(&blob("b")));
    }

    #[test]
    fn test_and_leaves_operands_untouched() {
        let base = Selection::equals("row_field", blob("r"));
        let before = base.clone();
        let _ = base.and(&Selection::equals("column_field", blob("c")));
        assert_eq!(base, before);
    }

    #[test]
    fn test_tuple_membership_sqlite() {
        let sel = Selection::one_of_tuples(
            &columns(&["row_field", "column_field"]),
            vec![vec![blob("r1"), blob("c1")], vec![blob("r2"), blob("c2")]],
        )
        .unwrap();
        let rendered = sel.render();
        assert_eq!(
            rendered.sql,
            "((row_field, column_field) IN (VALUES (:row_field_0, :column_field_0), \
             (:row_field_1, :column_field_1)))"
        );
        assert_eq!(rendered.params.len(), 4);
    }

    #[test]
    fn test_tuple_membership_postgres() {
        let sel = Selection::one_of_tuples(
            &columns(&["row_field", "column_field"]),
            vec![vec![blob("r1"), blob("c1")]],
        )
        .unwrap();
        assert_eq!(
            sel.render_for(Dialect::Postgres).sql,
            "((row_field, column_field) IN ((:row_field_0, :column_field_0)))"
        );
    }

    #[test]
    fn test_single_column_tuple_is_plain_in() {
        let sel = Selection::one_of_tuples(&columns(&["row_field"]), vec![vec![blob("a")]]).unwrap();
        assert_eq!(sel, Selection::one_of("row_field", vec![blob("a")]));
    }

    #[test]
    fn test_tuple_arity_mismatch() {
        let err = Selection::one_of_tuples(
            &columns(&["row_field", "column_field"]),
            vec![vec![blob("only-one")]],
        )
        .unwrap_err();
        assert!(matches!(err, DbError::TypeMismatch { .. }));
    }

    #[test]
    fn test_bindings() {
        let sel = Selection::equals("row_field", blob("r")).and(&Selection::equals("value_field", blob("v")));
        let params = sel.bindings().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("value_field"), Some(&blob("v")));

        let set = Selection::one_of("row_field", vec![blob("r")]);
        assert!(matches!(set.bindings(), Err(DbError::Unsupported { .. })));
    }
}
