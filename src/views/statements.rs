//! SQL statement templates used by the views.
//!
//! Each builder takes the relation name and an already rendered `WHERE`
//! fragment; all values travel as parameters.

/// `SELECT 1 ... LIMIT 1`
pub fn exists(relation: &str, predicate: &str) -> String {
    format!("SELECT 1 FROM {relation} WHERE {predicate} LIMIT 1")
}

/// Row count, or the number of distinct key tuples when `distinct` is set.
pub fn count(relation: &str, columns: &[String], predicate: &str, distinct: bool) -> String {
    if distinct {
        format!(
            "SELECT COUNT(*) FROM (SELECT DISTINCT {} FROM {relation} WHERE {predicate}) AS distinct_keys",
            columns.join(", ")
        )
    } else {
        format!("SELECT COUNT(*) FROM {relation} WHERE {predicate}")
    }
}

/// Ordered scan of `columns`.
pub fn select(relation: &str, columns: &[String], predicate: &str, distinct: bool) -> String {
    let columns = columns.join(", ");
    let distinct = if distinct { "DISTINCT " } else { "" };
    format!("SELECT {distinct}{columns} FROM {relation} WHERE {predicate} ORDER BY {columns}")
}

/// First matching row.
pub fn select_first(relation: &str, columns: &[String], predicate: &str) -> String {
    format!(
        "SELECT {} FROM {relation} WHERE {predicate} LIMIT 1",
        columns.join(", ")
    )
}

/// `DELETE`; no predicate deletes every row.
pub fn delete(relation: &str, predicate: Option<&str>) -> String {
    match predicate {
        Some(predicate) => format!("DELETE FROM {relation} WHERE {predicate}"),
        None => format!("DELETE FROM {relation}"),
    }
}

/// Delete rows in scope that are not in `keep`.
pub fn delete_excluding(relation: &str, keep: &str, scope: &str) -> String {
    format!("DELETE FROM {relation} WHERE NOT {keep} AND {scope}")
}
