//! SQLite backend built on rusqlite.

use std::path::Path;

use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, Statement};

use super::backend::{DatabaseBackend, Dialect, Params, QueryResult};
use super::value::DataValue;
use super::DbError;

/// SQLite database wrapper implementing the DatabaseBackend trait.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (or creates) a SQLite database file at the specified path.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path).map_err(|e| DbError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "opened sqlite database");
        Ok(Self { conn })
    }

    /// Opens a private in-memory database.
    pub fn open_mem() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { conn })
    }
}

impl ToSql for DataValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            DataValue::Null => ToSqlOutput::Owned(Value::Null),
            DataValue::Int(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            DataValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            DataValue::Bytes(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// Placeholder names as rusqlite expects them (with the `:` prefix).
fn named_params(params: &Params) -> Vec<(String, &DataValue)> {
    params
        .iter()
        .map(|(name, value)| (format!(":{name}"), value))
        .collect()
}

fn execute_prepared(stmt: &mut Statement<'_>, params: &Params) -> Result<usize, DbError> {
    let named = named_params(params);
    let refs: Vec<(&str, &dyn ToSql)> = named
        .iter()
        .map(|(name, value)| (name.as_str(), *value as &dyn ToSql))
        .collect();
    Ok(stmt.execute(refs.as_slice())?)
}

fn convert_value(value: ValueRef<'_>) -> Result<DataValue, DbError> {
    match value {
        ValueRef::Null => Ok(DataValue::Null),
        ValueRef::Integer(i) => Ok(DataValue::Int(i)),
        ValueRef::Text(t) => Ok(DataValue::Text(String::from_utf8_lossy(t).into_owned())),
        ValueRef::Blob(b) => Ok(DataValue::Bytes(b.to_vec())),
        ValueRef::Real(_) => Err(DbError::TypeMismatch {
            expected: "blob, text, integer or null",
            found: "real",
        }),
    }
}

impl DatabaseBackend for SqliteBackend {
    fn execute_query(&self, sql: &str, params: &Params) -> Result<QueryResult, DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        let headers: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let named = named_params(params);
        let refs: Vec<(&str, &dyn ToSql)> = named
            .iter()
            .map(|(name, value)| (name.as_str(), *value as &dyn ToSql))
            .collect();

        let mut rows = stmt.query(refs.as_slice())?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..headers.len())
                .map(|idx| convert_value(row.get_ref(idx)?))
                .collect::<Result<Vec<_>, DbError>>()?;
            out.push(values);
        }

        Ok(QueryResult { headers, rows: out })
    }

    fn execute_statement(&self, sql: &str, params: &Params) -> Result<usize, DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        execute_prepared(&mut stmt, params)
    }

    fn execute_batch(&self, sql: &str, batch: &[Params]) -> Result<usize, DbError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut total = 0;
        {
            let mut stmt = tx.prepare(sql)?;
            for params in batch {
                total += execute_prepared(&mut stmt, params)?;
            }
        }
        tx.commit()?;
        Ok(total)
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn backend_name(&self) -> &'static str {
        "Sqlite"
    }

    fn close(self: Box<Self>) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))
    }
}
