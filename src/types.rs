//! Element types produced by table views.

use serde::Serialize;

/// Raw row keys, column keys and values as stored in the relation.
pub type Bytes = Vec<u8>;

/// A key/value pair from a map view.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// One cell of a table: row key, column key and value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cell<R, C, V> {
    pub row: R,
    pub column: C,
    pub value: V,
}

impl<R, C, V> Cell<R, C, V> {
    pub fn new(row: R, column: C, value: V) -> Self {
        Self { row, column, value }
    }
}
