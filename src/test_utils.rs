//! Shared test utilities for unit and command tests.

use std::sync::{Mutex, OnceLock};

use crate::commands::Execute;
use crate::db::schema::{COLUMN_FIELD, ROW_FIELD, VALUE_FIELD};
use crate::db::{RelationHandle, SqliteBackend};
use crate::selection::Selection;
use crate::table::DbTable;
use crate::types::Bytes;
use crate::views::Scope;

/// Serializes tests that touch process-wide state (env vars, working dir).
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// UTF-8 bytes of `s`.
pub fn blob(s: &str) -> Bytes {
    s.as_bytes().to_vec()
}

/// A relation handle over a private in-memory SQLite database, with the
/// relation already created.
pub fn memory_handle(relation: &str) -> RelationHandle {
    let backend = SqliteBackend::open_mem().expect("Failed to open in-memory database");
    let handle = RelationHandle::new(relation, Box::new(backend)).expect("Invalid relation name");
    handle.create_if_absent().expect("Failed to create relation");
    handle
}

/// Store `(row, column, value)` text triples directly through the handle.
pub fn put_cells(handle: &RelationHandle, cells: &[(&str, &str, &str)]) {
    let selections: Vec<Selection> = cells
        .iter()
        .map(|(row, column, value)| {
            Selection::equals(ROW_FIELD, blob(row).into())
                .and(&Selection::equals(COLUMN_FIELD, blob(column).into()))
                .and(&Selection::equals(VALUE_FIELD, blob(value).into()))
        })
        .collect();
    Scope::new(handle, Selection::all())
        .upsert_batch(&selections)
        .expect("Failed to store cells");
}

/// A table over a private in-memory SQLite database.
pub fn memory_table(relation: &str) -> DbTable {
    let backend = SqliteBackend::open_mem().expect("Failed to open in-memory database");
    DbTable::open(relation, Box::new(backend)).expect("Failed to open table")
}

/// A table pre-filled with `(row, column, value)` text triples.
pub fn table_with(cells: &[(&str, &str, &str)]) -> DbTable {
    let table = memory_table("cells");
    for (row, column, value) in cells {
        table
            .put(row.as_bytes(), column.as_bytes(), value.as_bytes())
            .expect("Failed to store cell");
    }
    table
}

/// Execute a command against a table and return the result.
pub fn execute_cmd<C: Execute>(
    cmd: C,
    table: &mut DbTable,
) -> Result<C::Output, Box<dyn std::error::Error>> {
    cmd.execute(table)
}
