use std::vec;

use super::{DbCollection, DbSet, Scope};
use crate::db::DbError;
use crate::mapper::{EntryMapper, RowMapper};
use crate::selection::{EntrySelection, Selection, SelectionFactory};
use crate::types::Entry;

/// Map view: key columns identify an entry, one value column holds its value.
///
/// Writes bind the base selection's fixed columns together with the key and
/// value, so a map scoped to one row writes cells of that row.
#[derive(Debug, Clone)]
pub struct DbMap<'a, KF, KM, VF, VM> {
    scope: Scope<'a>,
    key_factory: KF,
    key_mapper: KM,
    value_factory: VF,
    value_mapper: VM,
}

impl<'a, KF, KM, VF, VM> DbMap<'a, KF, KM, VF, VM>
where
    KF: SelectionFactory + Clone,
    KM: RowMapper<Output = KF::Element> + Clone,
    VF: SelectionFactory + Clone,
    VM: RowMapper<Output = VF::Element> + Clone,
{
    pub fn new(scope: Scope<'a>, key: (KF, KM), value: (VF, VM)) -> Self {
        Self {
            scope,
            key_factory: key.0,
            key_mapper: key.1,
            value_factory: value.0,
            value_mapper: value.1,
        }
    }

    pub fn size(&self) -> Result<usize, DbError> {
        self.scope
            .count(&Selection::all(), self.key_factory.key_columns(), true)
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(!self.scope.exists(&Selection::all())?)
    }

    pub fn contains_key(&self, key: &KF::Element) -> Result<bool, DbError> {
        self.scope.exists(&self.key_factory.scalar(key))
    }

    pub fn contains_value(&self, value: &VF::Element) -> Result<bool, DbError> {
        self.scope.exists(&self.value_factory.scalar(value))
    }

    pub fn get(&self, key: &KF::Element) -> Result<Option<VF::Element>, DbError> {
        let result = self
            .scope
            .select_first(&self.key_factory.scalar(key), self.value_factory.key_columns())?;
        result
            .iter()
            .next()
            .map(|row| self.value_mapper.map_row(&row))
            .transpose()
    }

    /// Insert or replace the value under `key`, returning the previous value.
    ///
    /// The previous value is read before the upsert runs; a concurrent writer
    /// can slip in between the two statements.
    pub fn put(
        &self,
        key: &KF::Element,
        value: &VF::Element,
    ) -> Result<Option<VF::Element>, DbError> {
        let previous = self.get(key)?;
        self.scope.upsert(&self.entry_selection(key, value))?;
        Ok(previous)
    }

    /// Remove the entry under `key`, returning its value.
    ///
    /// Reads then deletes; not atomic.
    pub fn remove(&self, key: &KF::Element) -> Result<Option<VF::Element>, DbError> {
        let previous = self.get(key)?;
        if previous.is_some() {
            self.scope.delete(&self.key_factory.scalar(key))?;
        }
        Ok(previous)
    }

    /// Upsert many entries in one batch.
    pub fn put_all(&self, entries: &[(KF::Element, VF::Element)]) -> Result<(), DbError> {
        let selections: Vec<Selection> = entries
            .iter()
            .map(|(key, value)| self.entry_selection(key, value))
            .collect();
        self.scope.upsert_batch(&selections)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), DbError> {
        self.scope.delete(&Selection::all())?;
        Ok(())
    }

    pub fn key_set(&self) -> DbSet<'a, KF, KM> {
        DbSet::new(
            self.scope.clone(),
            self.key_factory.clone(),
            self.key_mapper.clone(),
        )
    }

    /// Values of all entries; equal values under different keys all count.
    pub fn values(&self) -> DbCollection<'a, VF, VM> {
        DbCollection::new(
            self.scope.clone(),
            self.value_factory.clone(),
            self.value_mapper.clone(),
        )
    }

    pub fn entry_set(&self) -> DbSet<'a, EntrySelection<KF, VF>, EntryMapper<KM, VM>> {
        DbSet::new(
            self.scope.clone(),
            EntrySelection::new(self.key_factory.clone(), self.value_factory.clone()),
            EntryMapper::new(self.key_mapper.clone(), self.value_mapper.clone()),
        )
    }

    /// Fresh read of all entries, ordered by key.
    pub fn iter(&self) -> Result<vec::IntoIter<Entry<KF::Element, VF::Element>>, DbError> {
        self.entry_set().iter()
    }

    fn entry_selection(&self, key: &KF::Element, value: &VF::Element) -> Selection {
        self.key_factory
            .scalar(key)
            .and(&self.value_factory.scalar(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{COLUMN_FIELD, ROW_FIELD, VALUE_FIELD};
    use crate::db::RelationHandle;
    use crate::test_utils::{blob, memory_handle, put_cells};
    use crate::views::{byte_field, ByteMap};
    use rstest::{fixture, rstest};

    #[fixture]
    fn handle() -> RelationHandle {
        memory_handle("cells")
    }

    fn row<'a>(handle: &'a RelationHandle, key: &str) -> ByteMap<'a> {
        DbMap::new(
            Scope::new(handle, Selection::equals(ROW_FIELD, blob(key).into())),
            byte_field(COLUMN_FIELD),
            byte_field(VALUE_FIELD),
        )
    }

    #[rstest]
    fn test_put_returns_previous(handle: RelationHandle) {
        let map = row(&handle, "r");
        assert_eq!(map.put(&blob("c"), &blob("v1")).unwrap(), None);
        assert_eq!(map.put(&blob("c"), &blob("v2")).unwrap(), Some(blob("v1")));
        assert_eq!(map.get(&blob("c")).unwrap(), Some(blob("v2")));
        assert_eq!(map.size().unwrap(), 1);
    }

    #[rstest]
    fn test_rows_do_not_leak(handle: RelationHandle) {
        let r = row(&handle, "r");
        let r2 = row(&handle, "r2");
        assert!(r.is_empty().unwrap());

        r.put(&blob("c"), &blob("v")).unwrap();
        assert_eq!(
            r.iter().unwrap().collect::<Vec<_>>(),
            vec![Entry::new(blob("c"), blob("v"))]
        );
        assert!(r2.is_empty().unwrap());
        assert_eq!(r2.size().unwrap(), 0);
        assert_eq!(r2.get(&blob("c")).unwrap(), None);
    }

    #[rstest]
    fn test_remove(handle: RelationHandle) {
        put_cells(&handle, &[("r", "a", "1"), ("r", "b", "2")]);
        let map = row(&handle, "r");
        assert_eq!(map.remove(&blob("a")).unwrap(), Some(blob("1")));
        assert_eq!(map.remove(&blob("a")).unwrap(), None);
        assert_eq!(map.size().unwrap(), 1);
    }

    #[rstest]
    fn test_contains(handle: RelationHandle) {
        put_cells(&handle, &[("r", "a", "1"), ("other", "b", "2")]);
        let map = row(&handle, "r");
        assert!(map.contains_key(&blob("a")).unwrap());
        assert!(!map.contains_key(&blob("b")).unwrap());
        assert!(map.contains_value(&blob("1")).unwrap());
        assert!(!map.contains_value(&blob("2")).unwrap());
    }

    #[rstest]
    fn test_put_all_and_derived_views(handle: RelationHandle) {
        let map = row(&handle, "r");
        map.put_all(&[
            (blob("a"), blob("1")),
            (blob("b"), blob("1")),
            (blob("c"), blob("2")),
        ])
        .unwrap();

        assert_eq!(map.size().unwrap(), 3);
        assert_eq!(map.key_set().size().unwrap(), 3);
        assert_eq!(map.values().size().unwrap(), 3);
        assert_eq!(map.entry_set().size().unwrap(), 3);
        assert!(map.entry_set().contains(&Entry::new(blob("b"), blob("1"))).unwrap());
        assert!(!map.entry_set().contains(&Entry::new(blob("b"), blob("2"))).unwrap());

        map.put_all(&[]).unwrap();
        assert_eq!(map.size().unwrap(), 3);
    }

    #[rstest]
    fn test_entry_set_remove_matches_value(handle: RelationHandle) {
        put_cells(&handle, &[("r", "a", "1")]);
        let entries = row(&handle, "r").entry_set();
        assert!(!entries.remove(&Entry::new(blob("a"), blob("2"))).unwrap());
        assert!(entries.remove(&Entry::new(blob("a"), blob("1"))).unwrap());
        assert!(entries.is_empty().unwrap());
    }

    #[rstest]
    fn test_key_set_remove_writes_through(handle: RelationHandle) {
        put_cells(&handle, &[("r", "a", "1"), ("r", "b", "2")]);
        let map = row(&handle, "r");
        assert!(map.key_set().remove(&blob("a")).unwrap());
        assert!(!map.contains_key(&blob("a")).unwrap());
    }

    #[rstest]
    fn test_clear_is_scoped(handle: RelationHandle) {
        put_cells(&handle, &[("r", "a", "1"), ("r2", "a", "2")]);
        row(&handle, "r").clear().unwrap();
        assert!(row(&handle, "r").is_empty().unwrap());
        assert_eq!(row(&handle, "r2").size().unwrap(), 1);
    }
}
