//! Row mapping: decoding result rows into view elements.
//!
//! A [`FieldMapper`] reads one named column and decodes it. Pair, entry and
//! cell mappers run their parts against the same row and assemble the result;
//! they add no semantics of their own.

use std::fmt;

use crate::db::{DataValue, DbError, FromDataValue, ResultRow};
use crate::types::{Cell, Entry};

pub trait RowMapper {
    type Output;

    fn map_row(&self, row: &ResultRow<'_>) -> Result<Self::Output, DbError>;
}

/// Decode function for one column value.
pub type Decoder<T> = fn(&DataValue) -> Result<T, DbError>;

/// Reads one column and decodes it.
pub struct FieldMapper<T> {
    column: String,
    decode: Decoder<T>,
}

impl<T: FromDataValue> FieldMapper<T> {
    pub fn new(column: &str) -> Self {
        Self::with_decoder(column, T::from_data_value)
    }
}

impl<T> FieldMapper<T> {
    pub fn with_decoder(column: &str, decode: Decoder<T>) -> Self {
        Self {
            column: column.to_string(),
            decode,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl<T> Clone for FieldMapper<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            decode: self.decode,
        }
    }
}

impl<T> fmt::Debug for FieldMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldMapper").field(&self.column).finish()
    }
}

impl<T> RowMapper for FieldMapper<T> {
    type Output = T;

    fn map_row(&self, row: &ResultRow<'_>) -> Result<T, DbError> {
        (self.decode)(row.get(&self.column)?)
    }
}

#[derive(Debug, Clone)]
pub struct PairMapper<A, B> {
    first: A,
    second: B,
}

impl<A, B> PairMapper<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: RowMapper, B: RowMapper> RowMapper for PairMapper<A, B> {
    type Output = (A::Output, B::Output);

    fn map_row(&self, row: &ResultRow<'_>) -> Result<Self::Output, DbError> {
        Ok((self.first.map_row(row)?, self.second.map_row(row)?))
    }
}

#[derive(Debug, Clone)]
pub struct EntryMapper<K, V> {
    key: K,
    value: V,
}

impl<K, V> EntryMapper<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key_mapper(&self) -> &K {
        &self.key
    }

    pub fn value_mapper(&self) -> &V {
        &self.value
    }
}

impl<K: RowMapper, V: RowMapper> RowMapper for EntryMapper<K, V> {
    type Output = Entry<K::Output, V::Output>;

    fn map_row(&self, row: &ResultRow<'_>) -> Result<Self::Output, DbError> {
        Ok(Entry::new(self.key.map_row(row)?, self.value.map_row(row)?))
    }
}

#[derive(Debug, Clone)]
pub struct CellMapper<R, C, V> {
    row: R,
    column: C,
    value: V,
}

impl<R, C, V> CellMapper<R, C, V> {
    pub fn new(row: R, column: C, value: V) -> Self {
        Self { row, column, value }
    }
}

impl<R: RowMapper, C: RowMapper, V: RowMapper> RowMapper for CellMapper<R, C, V> {
    type Output = Cell<R::Output, C::Output, V::Output>;

    fn map_row(&self, row: &ResultRow<'_>) -> Result<Self::Output, DbError> {
        Ok(Cell::new(
            self.row.map_row(row)?,
            self.column.map_row(row)?,
            self.value.map_row(row)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{COLUMN_FIELD, ROW_FIELD, VALUE_FIELD};
    use crate::types::Bytes;

    fn headers() -> Vec<String> {
        vec![VALUE_FIELD.to_string(), ROW_FIELD.to_string(), COLUMN_FIELD.to_string()]
    }

    fn values() -> Vec<DataValue> {
        vec![
            DataValue::Bytes(b"v".to_vec()),
            DataValue::Bytes(b"r".to_vec()),
            DataValue::Bytes(b"c".to_vec()),
        ]
    }

    #[test]
    fn test_field_mapper_reads_by_name() {
        let (headers, values) = (headers(), values());
        let row = ResultRow::new(&headers, &values);
        let mapper = FieldMapper::<Bytes>::new(ROW_FIELD);
        assert_eq!(mapper.map_row(&row).unwrap(), b"r".to_vec());
    }

    #[test]
    fn test_cell_mapper_ignores_select_order() {
        let (headers, values) = (headers(), values());
        let row = ResultRow::new(&headers, &values);
        let mapper = CellMapper::new(
            FieldMapper::<Bytes>::new(ROW_FIELD),
            FieldMapper::<Bytes>::new(COLUMN_FIELD),
            FieldMapper::<Bytes>::new(VALUE_FIELD),
        );
        assert_eq!(
            mapper.map_row(&row).unwrap(),
            Cell::new(b"r".to_vec(), b"c".to_vec(), b"v".to_vec())
        );
    }

    #[test]
    fn test_entry_and_pair_mappers() {
        let (headers, values) = (headers(), values());
        let row = ResultRow::new(&headers, &values);
        let entry = EntryMapper::new(
            FieldMapper::<String>::new(COLUMN_FIELD),
            FieldMapper::<String>::new(VALUE_FIELD),
        );
        assert_eq!(entry.map_row(&row).unwrap(), Entry::new("c".to_string(), "v".to_string()));
        assert_eq!(entry.key_mapper().column(), COLUMN_FIELD);

        let pair = PairMapper::new(entry.key_mapper().clone(), entry.value_mapper().clone());
        assert_eq!(pair.map_row(&row).unwrap(), ("c".to_string(), "v".to_string()));
    }

    #[test]
    fn test_custom_decoder() {
        let (headers, values) = (headers(), values());
        let row = ResultRow::new(&headers, &values);
        let mapper = FieldMapper::with_decoder(VALUE_FIELD, |v| {
            Ok(v.as_bytes().map(<[u8]>::len).unwrap_or(0))
        });
        assert_eq!(mapper.map_row(&row).unwrap(), 1);
    }

    #[test]
    fn test_missing_column() {
        let headers = vec![ROW_FIELD.to_string()];
        let values = vec![DataValue::Bytes(b"r".to_vec())];
        let row = ResultRow::new(&headers, &values);
        let err = FieldMapper::<Bytes>::new(VALUE_FIELD).map_row(&row).unwrap_err();
        assert!(matches!(err, DbError::MissingColumn { .. }));
    }
}
