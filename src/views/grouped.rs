use std::vec;

use super::{byte_field, ByteMap, ByteSet, DbMap, DbSet, Scope};
use crate::db::schema::VALUE_FIELD;
use crate::db::{DbError, RelationHandle};
use crate::selection::Selection;
use crate::types::{Bytes, Entry};

/// Map of maps: rows keyed by row key (inner maps keyed by column), or the
/// transpose.
///
/// Inner maps are views too, scoped to one group; nothing is materialized.
#[derive(Debug, Clone)]
pub struct GroupedMap<'a> {
    handle: &'a RelationHandle,
    group_column: &'static str,
    inner_column: &'static str,
}

impl<'a> GroupedMap<'a> {
    pub fn new(
        handle: &'a RelationHandle,
        group_column: &'static str,
        inner_column: &'static str,
    ) -> Self {
        Self {
            handle,
            group_column,
            inner_column,
        }
    }

    fn scope(&self) -> Scope<'a> {
        Scope::new(self.handle, Selection::all())
    }

    fn group(&self, key: &[u8]) -> Selection {
        Selection::equals(self.group_column, key.into())
    }

    /// The inner map for `key`, whether or not it has entries.
    pub fn inner(&self, key: &[u8]) -> ByteMap<'a> {
        DbMap::new(
            Scope::new(self.handle, self.group(key)),
            byte_field(self.inner_column),
            byte_field(VALUE_FIELD),
        )
    }

    /// Number of non-empty groups.
    pub fn size(&self) -> Result<usize, DbError> {
        self.key_set().size()
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        self.key_set().is_empty()
    }

    pub fn contains_key(&self, key: &[u8]) -> Result<bool, DbError> {
        self.scope().exists(&self.group(key))
    }

    /// The inner map for `key`, or `None` when the group has no entries.
    pub fn get(&self, key: &[u8]) -> Result<Option<ByteMap<'a>>, DbError> {
        Ok(self.contains_key(key)?.then(|| self.inner(key)))
    }

    /// Delete the whole group; returns whether it had entries.
    pub fn remove(&self, key: &[u8]) -> Result<bool, DbError> {
        Ok(self.scope().delete(&self.group(key))? > 0)
    }

    pub fn clear(&self) -> Result<(), DbError> {
        self.scope().delete(&Selection::all())?;
        Ok(())
    }

    pub fn key_set(&self) -> ByteSet<'a> {
        let (factory, mapper) = byte_field(self.group_column);
        DbSet::new(self.scope(), factory, mapper)
    }

    /// Group keys with their inner maps, ordered by key.
    pub fn iter(&self) -> Result<vec::IntoIter<Entry<Bytes, ByteMap<'a>>>, DbError> {
        let entries: Vec<_> = self
            .key_set()
            .iter()?
            .map(|key| {
                let inner = self.inner(&key);
                Entry::new(key, inner)
            })
            .collect();
        Ok(entries.into_iter())
    }
}
