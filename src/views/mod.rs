//! Lazy collection views over a relation.
//!
//! A view is a base selection plus a selection factory and a row mapper,
//! borrowed against the table's [`RelationHandle`]. Views hold no rows: every
//! call renders one statement from `base AND element` and runs it.
//!
//! - [`DbCollection`]: a bag of elements (duplicates counted)
//! - [`DbSet`]: distinct elements
//! - [`DbMap`]: key/value view with derived key set, values and entry set
//! - [`GroupedMap`]: rows or columns as a map of maps

mod collection;
mod grouped;
mod map;
pub mod statements;

pub use collection::{DbCollection, DbSet};
pub use grouped::GroupedMap;
pub use map::DbMap;

use crate::db::schema::{self, FIELDS};
use crate::db::{DbError, Params, QueryResult, RelationHandle};
use crate::mapper::{CellMapper, FieldMapper, PairMapper, RowMapper};
use crate::selection::{
    CellSelection, FieldSelection, PairSelection, ParamNamer, RenderedSelection, Selection,
};
use crate::types::Bytes;

/// Single-column selection factory over raw bytes.
pub type ByteField = FieldSelection<Bytes>;
/// Single-column mapper over raw bytes.
pub type ByteMapper = FieldMapper<Bytes>;
/// A byte key/value map, e.g. one row keyed by column.
pub type ByteMap<'a> = DbMap<'a, ByteField, ByteMapper, ByteField, ByteMapper>;
pub type ByteSet<'a> = DbSet<'a, ByteField, ByteMapper>;
pub type ByteCollection<'a> = DbCollection<'a, ByteField, ByteMapper>;
/// `(row, column)` key factory.
pub type CellKeyField = PairSelection<ByteField, ByteField>;
pub type CellKeyMapper = PairMapper<ByteMapper, ByteMapper>;
/// Flat map keyed by `(row, column)`.
pub type CellMap<'a> = DbMap<'a, CellKeyField, CellKeyMapper, ByteField, ByteMapper>;
pub type CellField = CellSelection<ByteField, ByteField, ByteField>;
pub type CellRowMapper = CellMapper<ByteMapper, ByteMapper, ByteMapper>;
pub type CellSet<'a> = DbSet<'a, CellField, CellRowMapper>;

/// Selection factory and mapper for one byte column.
pub(crate) fn byte_field(column: &str) -> (ByteField, ByteMapper) {
    (FieldSelection::new(column), FieldMapper::new(column))
}

/// Base selection of a view bound to its relation.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    handle: &'a RelationHandle,
    base: Selection,
}

impl<'a> Scope<'a> {
    pub fn new(handle: &'a RelationHandle, base: Selection) -> Self {
        Self { handle, base }
    }

    /// A scope further restricted by `element`.
    pub fn narrow(&self, element: &Selection) -> Scope<'a> {
        Scope {
            handle: self.handle,
            base: self.base.and(element),
        }
    }

    fn render(&self, element: &Selection) -> Result<RenderedSelection, DbError> {
        Ok(self.base.and(element).render_for(self.handle.dialect()?))
    }

    /// Whether any row matches `base AND element`.
    pub fn exists(&self, element: &Selection) -> Result<bool, DbError> {
        let rendered = self.render(element)?;
        let sql = statements::exists(self.handle.name(), &rendered.sql);
        Ok(!self.handle.query(&sql, &rendered.params)?.is_empty())
    }

    /// Number of matching rows, or of distinct `columns` tuples.
    pub fn count(
        &self,
        element: &Selection,
        columns: &[String],
        distinct: bool,
    ) -> Result<usize, DbError> {
        let rendered = self.render(element)?;
        let sql = statements::count(self.handle.name(), columns, &rendered.sql, distinct);
        let result = self.handle.query(&sql, &rendered.params)?;
        result
            .first_value()
            .and_then(|v| v.as_i64())
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| DbError::QueryFailed {
                message: "count returned no integer".to_string(),
            })
    }

    /// All rows in scope, ordered by `columns`.
    pub fn select(&self, columns: &[String], distinct: bool) -> Result<QueryResult, DbError> {
        let rendered = self.render(&Selection::all())?;
        let sql = statements::select(self.handle.name(), columns, &rendered.sql, distinct);
        self.handle.query(&sql, &rendered.params)
    }

    /// At most one row matching `base AND element`.
    pub fn select_first(
        &self,
        element: &Selection,
        columns: &[String],
    ) -> Result<QueryResult, DbError> {
        let rendered = self.render(element)?;
        let sql = statements::select_first(self.handle.name(), columns, &rendered.sql);
        self.handle.query(&sql, &rendered.params)
    }

    /// Delete rows matching `base AND element`.
    pub fn delete(&self, element: &Selection) -> Result<usize, DbError> {
        let combined = self.base.and(element);
        if combined.is_universal() {
            return self
                .handle
                .execute(&statements::delete(self.handle.name(), None), &Params::new());
        }
        let rendered = combined.render_for(self.handle.dialect()?);
        let sql = statements::delete(self.handle.name(), Some(&rendered.sql));
        self.handle.execute(&sql, &rendered.params)
    }

    /// Delete rows in scope that do not match `keep`.
    pub fn delete_excluding(&self, keep: &Selection) -> Result<usize, DbError> {
        let dialect = self.handle.dialect()?;
        let mut namer = ParamNamer::new();
        let keep_sql = keep.render_with(dialect, &mut namer);
        let scope_sql = self.base.render_with(dialect, &mut namer);
        let sql = statements::delete_excluding(self.handle.name(), &keep_sql, &scope_sql);
        self.handle.execute(&sql, &namer.into_params())
    }

    fn upsert_params(&self, element: &Selection) -> Result<Params, DbError> {
        let params = self.base.and(element).bindings()?;
        if FIELDS.iter().all(|field| params.contains_key(*field)) {
            Ok(params)
        } else {
            Err(DbError::Unsupported {
                operation: "write without row, column and value",
            })
        }
    }

    /// Insert or replace the single row pinned by `base AND element`.
    pub fn upsert(&self, element: &Selection) -> Result<usize, DbError> {
        let params = self.upsert_params(element)?;
        let sql = schema::upsert(self.handle.dialect()?, self.handle.name());
        self.handle.execute(&sql, &params)
    }

    /// Insert or replace many rows in one transaction.
    pub fn upsert_batch(&self, elements: &[Selection]) -> Result<usize, DbError> {
        if elements.is_empty() {
            return Ok(0);
        }
        let batch = elements
            .iter()
            .map(|element| self.upsert_params(element))
            .collect::<Result<Vec<_>, DbError>>()?;
        let sql = schema::upsert(self.handle.dialect()?, self.handle.name());
        self.handle.batch(&sql, &batch)
    }
}

/// Decode every row of a result.
pub(crate) fn decode_all<M: RowMapper>(
    result: &QueryResult,
    mapper: &M,
) -> Result<Vec<M::Output>, DbError> {
    result.iter().map(|row| mapper.map_row(&row)).collect()
}
