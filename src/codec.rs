//! Typed access over the byte-level table.
//!
//! A [`Codec`] converts between a Rust type and the bytes stored in the
//! relation. [`TypedTable`] pairs a [`DbTable`] with one codec per position
//! (row, column, value) and encodes and decodes at the boundary.
//!
//! Lookups and writes go straight to the table. Views (`row`, `column`,
//! `cells`, key lists) run one query and decode the result into owned values.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::DbError;
use crate::table::DbTable;
use crate::types::{Bytes, Cell, Entry};

pub trait Codec<T> {
    fn encode(&self, value: &T) -> Result<Bytes, DbError>;
    fn decode(&self, bytes: &[u8]) -> Result<T, DbError>;
}

/// UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl Codec<String> for Utf8Codec {
    fn encode(&self, value: &String) -> Result<Bytes, DbError> {
        Ok(value.as_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DbError> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// Raw bytes, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl Codec<Bytes> for RawCodec {
    fn encode(&self, value: &Bytes) -> Result<Bytes, DbError> {
        Ok(value.clone())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Bytes, DbError> {
        Ok(bytes.to_vec())
    }
}

/// JSON via serde.
pub struct JsonCodec<T> {
    _type: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self { _type: PhantomData }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> Codec<T> for JsonCodec<T> {
    fn encode(&self, value: &T) -> Result<Bytes, DbError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, DbError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// A [`DbTable`] with typed rows, columns and values.
pub struct TypedTable<'t, R, C, V> {
    table: &'t DbTable,
    rows: Box<dyn Codec<R> + 't>,
    columns: Box<dyn Codec<C> + 't>,
    values: Box<dyn Codec<V> + 't>,
}

impl<'t, R, C, V> TypedTable<'t, R, C, V>
where
    R: Serialize + DeserializeOwned + 't,
    C: Serialize + DeserializeOwned + 't,
    V: Serialize + DeserializeOwned + 't,
{
    /// JSON for all three positions.
    pub fn json(table: &'t DbTable) -> Self {
        Self::new(
            table,
            Box::new(JsonCodec::new()),
            Box::new(JsonCodec::new()),
            Box::new(JsonCodec::new()),
        )
    }
}

impl<'t, R, C, V> TypedTable<'t, R, C, V> {
    pub fn new(
        table: &'t DbTable,
        rows: Box<dyn Codec<R> + 't>,
        columns: Box<dyn Codec<C> + 't>,
        values: Box<dyn Codec<V> + 't>,
    ) -> Self {
        Self {
            table,
            rows,
            columns,
            values,
        }
    }

    pub fn table(&self) -> &'t DbTable {
        self.table
    }

    pub fn contains(&self, row: &R, column: &C) -> Result<bool, DbError> {
        self.table
            .contains(&self.rows.encode(row)?, &self.columns.encode(column)?)
    }

    pub fn get(&self, row: &R, column: &C) -> Result<Option<V>, DbError> {
        self.table
            .get(&self.rows.encode(row)?, &self.columns.encode(column)?)?
            .map(|bytes| self.values.decode(&bytes))
            .transpose()
    }

    /// Store a value, returning the one it replaced. Not atomic.
    pub fn put(&self, row: &R, column: &C, value: &V) -> Result<Option<V>, DbError> {
        self.table
            .put(
                &self.rows.encode(row)?,
                &self.columns.encode(column)?,
                &self.values.encode(value)?,
            )?
            .map(|bytes| self.values.decode(&bytes))
            .transpose()
    }

    pub fn remove(&self, row: &R, column: &C) -> Result<Option<V>, DbError> {
        self.table
            .remove(&self.rows.encode(row)?, &self.columns.encode(column)?)?
            .map(|bytes| self.values.decode(&bytes))
            .transpose()
    }

    pub fn put_all(&self, cells: &[Cell<R, C, V>]) -> Result<(), DbError> {
        let encoded = cells
            .iter()
            .map(|cell| {
                Ok(Cell::new(
                    self.rows.encode(&cell.row)?,
                    self.columns.encode(&cell.column)?,
                    self.values.encode(&cell.value)?,
                ))
            })
            .collect::<Result<Vec<_>, DbError>>()?;
        self.table.put_all(&encoded)
    }

    /// Entries of one row, keyed by column.
    pub fn row(&self, row: &R) -> Result<Vec<Entry<C, V>>, DbError> {
        self.table
            .row(&self.rows.encode(row)?)
            .iter()?
            .map(|entry| {
                Ok(Entry::new(
                    self.columns.decode(&entry.key)?,
                    self.values.decode(&entry.value)?,
                ))
            })
            .collect()
    }

    /// Entries of one column, keyed by row.
    pub fn column(&self, column: &C) -> Result<Vec<Entry<R, V>>, DbError> {
        self.table
            .column(&self.columns.encode(column)?)
            .iter()?
            .map(|entry| {
                Ok(Entry::new(
                    self.rows.decode(&entry.key)?,
                    self.values.decode(&entry.value)?,
                ))
            })
            .collect()
    }

    pub fn cells(&self) -> Result<Vec<Cell<R, C, V>>, DbError> {
        self.table
            .cell_set()
            .iter()?
            .map(|cell| {
                Ok(Cell::new(
                    self.rows.decode(&cell.row)?,
                    self.columns.decode(&cell.column)?,
                    self.values.decode(&cell.value)?,
                ))
            })
            .collect()
    }

    pub fn row_keys(&self) -> Result<Vec<R>, DbError> {
        self.table
            .row_key_set()
            .iter()?
            .map(|key| self.rows.decode(&key))
            .collect()
    }

    pub fn column_keys(&self) -> Result<Vec<C>, DbError> {
        self.table
            .column_key_set()
            .iter()?
            .map(|key| self.columns.decode(&key))
            .collect()
    }

    pub fn size(&self) -> Result<usize, DbError> {
        self.table.size()
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        self.table.is_empty()
    }

    pub fn clear(&self) -> Result<(), DbError> {
        self.table.clear()
    }
}
