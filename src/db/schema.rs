//! Relation schema and DDL.
//!
//! Every table is a relation of exactly three columns with a composite
//! primary key on `(row_field, column_field)`, so a write always upserts.

use super::backend::Dialect;

/// Row key column.
pub const ROW_FIELD: &str = "row_field";

/// Column key column.
pub const COLUMN_FIELD: &str = "column_field";

/// Value column.
pub const VALUE_FIELD: &str = "value_field";

/// All columns in insertion order.
pub const FIELDS: [&str; 3] = [ROW_FIELD, COLUMN_FIELD, VALUE_FIELD];

/// `CREATE TABLE IF NOT EXISTS` for a relation.
pub fn create_relation(dialect: Dialect, relation: &str) -> String {
    let blob = dialect.blob_type();
    format!(
        "CREATE TABLE IF NOT EXISTS {relation} (\
         {ROW_FIELD} {blob} NOT NULL, \
         {COLUMN_FIELD} {blob} NOT NULL, \
         {VALUE_FIELD} {blob} NOT NULL, \
         PRIMARY KEY ({ROW_FIELD}, {COLUMN_FIELD}))"
    )
}

/// `DROP TABLE` for a relation.
pub fn drop_relation(relation: &str) -> String {
    format!("DROP TABLE {relation}")
}

/// Insert-or-replace of one row, bound by `:row_field`, `:column_field`, `:value_field`.
pub fn upsert(dialect: Dialect, relation: &str) -> String {
    let insert = format!(
        "INTO {relation} ({ROW_FIELD}, {COLUMN_FIELD}, {VALUE_FIELD}) \
         VALUES (:{ROW_FIELD}, :{COLUMN_FIELD}, :{VALUE_FIELD})"
    );
    match dialect {
        Dialect::Sqlite => format!("INSERT OR REPLACE {insert}"),
        Dialect::Postgres => format!(
            "INSERT {insert} ON CONFLICT ({ROW_FIELD}, {COLUMN_FIELD}) \
             DO UPDATE SET {VALUE_FIELD} = EXCLUDED.{VALUE_FIELD}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_relation_sqlite() {
        assert_eq!(
            create_relation(Dialect::Sqlite, "cells"),
            "CREATE TABLE IF NOT EXISTS cells (row_field BLOB NOT NULL, \
             column_field BLOB NOT NULL, value_field BLOB NOT NULL, \
             PRIMARY KEY (row_field, column_field))"
        );
    }

    #[test]
    fn test_create_relation_postgres_uses_bytea() {
        let sql = create_relation(Dialect::Postgres, "cells");
        assert!(sql.contains("row_field BYTEA NOT NULL"));
        assert!(!sql.contains("BLOB"));
    }

    #[test]
    fn test_upsert_sqlite() {
        assert_eq!(
            upsert(Dialect::Sqlite, "cells"),
            "INSERT OR REPLACE INTO cells (row_field, column_field, value_field) \
             VALUES (:row_field, :column_field, :value_field)"
        );
    }

    #[test]
    fn test_upsert_postgres() {
        let sql = upsert(Dialect::Postgres, "cells");
        assert!(sql.starts_with("INSERT INTO cells"));
        assert!(sql.ends_with(
            "ON CONFLICT (row_field, column_field) DO UPDATE SET value_field = EXCLUDED.value_field"
        ));
    }

    #[test]
    fn test_drop_relation() {
        assert_eq!(drop_relation("cells"), "DROP TABLE cells");
    }
}
