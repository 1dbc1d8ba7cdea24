//! Selection-map factories: from view elements to selections.
//!
//! A factory knows which key columns identify an element of a view and how to
//! turn one element (or many) into a [`Selection`]. Single-column factories
//! back key sets and value collections; composite factories back entry and
//! cell sets, whose elements are identified by several columns at once.
//!
//! Factories are generic over their element type, so handing a view an
//! element of the wrong type is a compile error rather than a failed cast.

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use super::Selection;
use crate::db::{DataValue, DbError, ToDataValue};
use crate::types::{Cell, Entry};

pub trait SelectionFactory {
    type Element;

    /// Columns identifying an element, in a fixed order.
    fn key_columns(&self) -> &[String];

    /// Raw values of an element, one per key column.
    fn key_values(&self, element: &Self::Element) -> Vec<DataValue>;

    /// Selection matching exactly one element.
    fn scalar(&self, element: &Self::Element) -> Selection {
        self.key_columns()
            .iter()
            .zip(self.key_values(element))
            .fold(Selection::all(), |selection, (column, value)| {
                selection.and(&Selection::equals(column, value))
            })
    }

    /// Selection matching any of `elements`. An empty slice matches nothing.
    fn set(&self, elements: &[Self::Element]) -> Result<Selection, DbError> {
        let rows = elements.iter().map(|e| self.key_values(e)).collect();
        Selection::one_of_tuples(self.key_columns(), rows)
    }

    /// Distinct raw keys of `elements`, compared by byte content.
    fn distinct_keys(&self, elements: &[Self::Element]) -> BTreeSet<Vec<DataValue>> {
        elements.iter().map(|e| self.key_values(e)).collect()
    }
}

/// Factory over a single column.
pub struct FieldSelection<T> {
    columns: [String; 1],
    _element: PhantomData<fn(&T)>,
}

impl<T> FieldSelection<T> {
    pub fn new(column: &str) -> Self {
        Self {
            columns: [column.to_string()],
            _element: PhantomData,
        }
    }

    pub fn column(&self) -> &str {
        &self.columns[0]
    }
}

impl<T> Clone for FieldSelection<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            _element: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FieldSelection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldSelection").field(&self.columns[0]).finish()
    }
}

impl<T: ToDataValue> SelectionFactory for FieldSelection<T> {
    type Element = T;

    fn key_columns(&self) -> &[String] {
        &self.columns
    }

    fn key_values(&self, element: &T) -> Vec<DataValue> {
        vec![element.to_data_value()]
    }
}

fn concat_columns(parts: &[&[String]]) -> Vec<String> {
    parts.iter().flat_map(|p| p.iter().cloned()).collect()
}

/// Factory over a pair of factories; elements are tuples.
#[derive(Debug, Clone)]
pub struct PairSelection<A, B> {
    first: A,
    second: B,
    columns: Vec<String>,
}

impl<A: SelectionFactory, B: SelectionFactory> PairSelection<A, B> {
    pub fn new(first: A, second: B) -> Self {
        let columns = concat_columns(&[first.key_columns(), second.key_columns()]);
        Self {
            first,
            second,
            columns,
        }
    }
}

impl<A: SelectionFactory, B: SelectionFactory> SelectionFactory for PairSelection<A, B> {
    type Element = (A::Element, B::Element);

    fn key_columns(&self) -> &[String] {
        &self.columns
    }

    fn key_values(&self, (a, b): &Self::Element) -> Vec<DataValue> {
        let mut values = self.first.key_values(a);
        values.extend(self.second.key_values(b));
        values
    }
}

/// Factory over entries, identified by key and value together.
#[derive(Debug, Clone)]
pub struct EntrySelection<K, V> {
    key: K,
    value: V,
    columns: Vec<String>,
}

impl<K: SelectionFactory, V: SelectionFactory> EntrySelection<K, V> {
    pub fn new(key: K, value: V) -> Self {
        let columns = concat_columns(&[key.key_columns(), value.key_columns()]);
        Self { key, value, columns }
    }
}

impl<K: SelectionFactory, V: SelectionFactory> SelectionFactory for EntrySelection<K, V> {
    type Element = Entry<K::Element, V::Element>;

    fn key_columns(&self) -> &[String] {
        &self.columns
    }

    fn key_values(&self, entry: &Self::Element) -> Vec<DataValue> {
        let mut values = self.key.key_values(&entry.key);
        values.extend(self.value.key_values(&entry.value));
        values
    }
}

/// Factory over cells, identified by all three columns.
#[derive(Debug, Clone)]
pub struct CellSelection<R, C, V> {
    row: R,
    column: C,
    value: V,
    columns: Vec<String>,
}

impl<R: SelectionFactory, C: SelectionFactory, V: SelectionFactory> CellSelection<R, C, V> {
    pub fn new(row: R, column: C, value: V) -> Self {
        let columns = concat_columns(&[row.key_columns(), column.key_columns(), value.key_columns()]);
        Self {
            row,
            column,
            value,
            columns,
        }
    }
}

impl<R: SelectionFactory, C: SelectionFactory, V: SelectionFactory> SelectionFactory
    for CellSelection<R, C, V>
{
    type Element = Cell<R::Element, C::Element, V::Element>;

    fn key_columns(&self) -> &[String] {
        &self.columns
    }

    fn key_values(&self, cell: &Self::Element) -> Vec<DataValue> {
        let mut values = self.row.key_values(&cell.row);
        values.extend(self.column.key_values(&cell.column));
        values.extend(self.value.key_values(&cell.value));
        values
    }
}
