//! The table facade.
//!
//! `DbTable` owns the relation handle and hands out views over it. Every view
//! borrows the table, so no view can outlive it, and `close`/`drop_relation`
//! (which need `&mut self`) cannot run while one is alive.

use crate::db::schema::{COLUMN_FIELD, ROW_FIELD, VALUE_FIELD};
use crate::db::{DatabaseBackend, DatabaseConfig, DbError, RelationHandle};
use crate::mapper::{CellMapper, PairMapper};
use crate::selection::{CellSelection, PairSelection, Selection};
use crate::types::{Bytes, Cell};
use crate::views::{
    byte_field, ByteCollection, ByteMap, ByteSet, CellMap, CellSet, DbCollection, DbMap, DbSet,
    GroupedMap, Scope,
};

/// A relational table of `(row, column) -> value` cells.
#[derive(Debug)]
pub struct DbTable {
    handle: RelationHandle,
}

impl DbTable {
    /// Bind `backend` to relation `name`, creating the relation if absent.
    pub fn open(name: &str, backend: Box<dyn DatabaseBackend>) -> Result<Self, DbError> {
        let handle = RelationHandle::new(name, backend)?;
        handle.create_if_absent()?;
        Ok(Self { handle })
    }

    /// Connect with `config` and open relation `name`.
    pub fn open_with_config(name: &str, config: &DatabaseConfig) -> Result<Self, DbError> {
        Self::open(name, config.connect()?)
    }

    /// Relation name.
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    fn scope(&self, base: Selection) -> Scope<'_> {
        Scope::new(&self.handle, base)
    }

    // Lookups

    pub fn contains(&self, row: &[u8], column: &[u8]) -> Result<bool, DbError> {
        self.cell_map().contains_key(&(row.to_vec(), column.to_vec()))
    }

    pub fn contains_row(&self, row: &[u8]) -> Result<bool, DbError> {
        self.row_key_set().contains(&row.to_vec())
    }

    pub fn contains_column(&self, column: &[u8]) -> Result<bool, DbError> {
        self.column_key_set().contains(&column.to_vec())
    }

    pub fn contains_value(&self, value: &[u8]) -> Result<bool, DbError> {
        self.values().contains(&value.to_vec())
    }

    pub fn get(&self, row: &[u8], column: &[u8]) -> Result<Option<Bytes>, DbError> {
        self.cell_map().get(&(row.to_vec(), column.to_vec()))
    }

    // Writes

    /// Store `value` at `(row, column)`, returning the value it replaced.
    ///
    /// Reads the previous value and then upserts; the two statements are not
    /// atomic.
    pub fn put(&self, row: &[u8], column: &[u8], value: &[u8]) -> Result<Option<Bytes>, DbError> {
        self.cell_map()
            .put(&(row.to_vec(), column.to_vec()), &value.to_vec())
    }

    /// Remove the cell at `(row, column)`, returning its value.
    pub fn remove(&self, row: &[u8], column: &[u8]) -> Result<Option<Bytes>, DbError> {
        self.cell_map().remove(&(row.to_vec(), column.to_vec()))
    }

    /// Upsert many cells in one batch.
    pub fn put_all(&self, cells: &[Cell<Bytes, Bytes, Bytes>]) -> Result<(), DbError> {
        let entries: Vec<_> = cells
            .iter()
            .map(|cell| ((cell.row.clone(), cell.column.clone()), cell.value.clone()))
            .collect();
        self.cell_map().put_all(&entries)
    }

    // Aggregates

    /// Number of cells.
    pub fn size(&self) -> Result<usize, DbError> {
        self.cell_map().size()
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        self.cell_map().is_empty()
    }

    /// Delete every cell. The relation itself stays.
    pub fn clear(&self) -> Result<(), DbError> {
        self.cell_map().clear()
    }

    // Views

    /// Cells of one row, keyed by column.
    pub fn row(&self, row: &[u8]) -> ByteMap<'_> {
        DbMap::new(
            self.scope(Selection::equals(ROW_FIELD, row.into())),
            byte_field(COLUMN_FIELD),
            byte_field(VALUE_FIELD),
        )
    }

    /// Cells of one column, keyed by row.
    pub fn column(&self, column: &[u8]) -> ByteMap<'_> {
        DbMap::new(
            self.scope(Selection::equals(COLUMN_FIELD, column.into())),
            byte_field(ROW_FIELD),
            byte_field(VALUE_FIELD),
        )
    }

    pub fn row_key_set(&self) -> ByteSet<'_> {
        let (factory, mapper) = byte_field(ROW_FIELD);
        DbSet::new(self.scope(Selection::all()), factory, mapper)
    }

    pub fn column_key_set(&self) -> ByteSet<'_> {
        let (factory, mapper) = byte_field(COLUMN_FIELD);
        DbSet::new(self.scope(Selection::all()), factory, mapper)
    }

    /// Every stored value, one per cell.
    pub fn values(&self) -> ByteCollection<'_> {
        let (factory, mapper) = byte_field(VALUE_FIELD);
        DbCollection::new(self.scope(Selection::all()), factory, mapper)
    }

    pub fn cell_set(&self) -> CellSet<'_> {
        let (row_factory, row_mapper) = byte_field(ROW_FIELD);
        let (column_factory, column_mapper) = byte_field(COLUMN_FIELD);
        let (value_factory, value_mapper) = byte_field(VALUE_FIELD);
        DbSet::new(
            self.scope(Selection::all()),
            CellSelection::new(row_factory, column_factory, value_factory),
            CellMapper::new(row_mapper, column_mapper, value_mapper),
        )
    }

    /// Flat map keyed by `(row, column)`.
    pub fn cell_map(&self) -> CellMap<'_> {
        let (row_factory, row_mapper) = byte_field(ROW_FIELD);
        let (column_factory, column_mapper) = byte_field(COLUMN_FIELD);
        DbMap::new(
            self.scope(Selection::all()),
            (
                PairSelection::new(row_factory, column_factory),
                PairMapper::new(row_mapper, column_mapper),
            ),
            byte_field(VALUE_FIELD),
        )
    }

    /// Rows keyed by row key, each a map keyed by column.
    pub fn row_map(&self) -> GroupedMap<'_> {
        GroupedMap::new(&self.handle, ROW_FIELD, COLUMN_FIELD)
    }

    /// Columns keyed by column key, each a map keyed by row.
    pub fn column_map(&self) -> GroupedMap<'_> {
        GroupedMap::new(&self.handle, COLUMN_FIELD, ROW_FIELD)
    }

    // Lifecycle

    /// Release the connection. Later calls fail with `DbError::Closed`.
    pub fn close(&mut self) -> Result<(), DbError> {
        self.handle.close()
    }

    /// Drop the relation and release the connection.
    pub fn drop_relation(&mut self) -> Result<(), DbError> {
        self.handle.drop_relation()
    }
}
