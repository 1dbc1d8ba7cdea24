//! Database backend trait for abstracting different database implementations.
//!
//! The table views render SQL with `:name` placeholders and a `Params` map;
//! a backend is responsible for binding those, executing the statement, and
//! returning rows as `DataValue`s.

use std::collections::BTreeMap;

use super::value::DataValue;
use super::DbError;

/// Type alias for query parameters, keyed by placeholder name (without the `:`).
pub type Params = BTreeMap<String, DataValue>;

/// SQL dialect differences the statement templates care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    /// Literal condition that matches every row.
    pub fn true_literal(self) -> &'static str {
        match self {
            Dialect::Sqlite => "1",
            Dialect::Postgres => "TRUE",
        }
    }

    /// Literal condition that matches no row.
    pub fn false_literal(self) -> &'static str {
        match self {
            Dialect::Sqlite => "0",
            Dialect::Postgres => "FALSE",
        }
    }

    /// Column type used for row keys, column keys and values.
    pub fn blob_type(self) -> &'static str {
        match self {
            Dialect::Sqlite => "BLOB",
            Dialect::Postgres => "BYTEA",
        }
    }
}

/// Result of a query execution.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<DataValue>>,
}

impl QueryResult {
    /// Returns true when the query produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the rows with column lookup by name.
    pub fn iter(&self) -> impl Iterator<Item = ResultRow<'_>> {
        self.rows.iter().map(|values| ResultRow {
            headers: &self.headers,
            values,
        })
    }

    /// The first column of the first row, if any.
    pub fn first_value(&self) -> Option<&DataValue> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// One result row, addressed by column name.
///
/// Looking columns up by header keeps the mappers independent of the column
/// order a statement happens to select them in.
#[derive(Debug, Clone, Copy)]
pub struct ResultRow<'r> {
    headers: &'r [String],
    values: &'r [DataValue],
}

impl<'r> ResultRow<'r> {
    pub fn new(headers: &'r [String], values: &'r [DataValue]) -> Self {
        Self { headers, values }
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Result<&'r DataValue, DbError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.values.get(idx))
            .ok_or_else(|| DbError::MissingColumn {
                name: column.to_string(),
            })
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row is empty (contains no columns).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Trait for database backends that can execute table statements.
///
/// Implementations own exactly one connection. They are `Send` so a table can
/// be moved to another thread, but not required to be `Sync`: a connection
/// serves one caller at a time.
pub trait DatabaseBackend: Send {
    /// Execute a query with named parameters, returning all rows.
    fn execute_query(&self, sql: &str, params: &Params) -> Result<QueryResult, DbError>;

    /// Execute a statement with named parameters, returning the affected row count.
    fn execute_statement(&self, sql: &str, params: &Params) -> Result<usize, DbError>;

    /// Prepare `sql` once and execute it for every parameter set in one transaction.
    ///
    /// Returns the total affected row count.
    fn execute_batch(&self, sql: &str, batch: &[Params]) -> Result<usize, DbError>;

    /// The SQL dialect this backend speaks.
    fn dialect(&self) -> Dialect;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Release the connection.
    fn close(self: Box<Self>) -> Result<(), DbError>;
}
