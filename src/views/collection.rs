use std::ops::Deref;
use std::vec;

use super::{decode_all, Scope};
use crate::db::DbError;
use crate::mapper::RowMapper;
use crate::selection::{Selection, SelectionFactory};

/// Collection view: every row in scope contributes one element.
///
/// Elements are identified by the factory's key columns. Their identity is
/// derived from stored rows, so elements cannot be added directly.
///
/// `contains_all`, `remove_all` and `retain_all` bind one parameter per key
/// column of every input element in a single statement. SQLite caps the
/// parameters of one statement (32766 in a default build); larger inputs fail
/// with `DbError::Sqlite` and leave the relation untouched.
#[derive(Debug, Clone)]
pub struct DbCollection<'a, F, M> {
    scope: Scope<'a>,
    factory: F,
    mapper: M,
    distinct: bool,
}

impl<'a, F, M> DbCollection<'a, F, M>
where
    F: SelectionFactory,
    M: RowMapper<Output = F::Element>,
{
    pub fn new(scope: Scope<'a>, factory: F, mapper: M) -> Self {
        Self {
            scope,
            factory,
            mapper,
            distinct: false,
        }
    }

    pub fn size(&self) -> Result<usize, DbError> {
        self.scope
            .count(&Selection::all(), self.factory.key_columns(), self.distinct)
    }

    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(!self.scope.exists(&Selection::all())?)
    }

    pub fn contains(&self, element: &F::Element) -> Result<bool, DbError> {
        self.scope.exists(&self.factory.scalar(element))
    }

    /// True when every element of `elements` is present. Duplicates in the
    /// input count once.
    pub fn contains_all(&self, elements: &[F::Element]) -> Result<bool, DbError> {
        let expected = self.factory.distinct_keys(elements).len();
        if expected == 0 {
            return Ok(true);
        }
        let found = self.scope.count(
            &self.factory.set(elements)?,
            self.factory.key_columns(),
            true,
        )?;
        Ok(found == expected)
    }

    /// Fresh read of all elements, ordered by key columns.
    pub fn iter(&self) -> Result<vec::IntoIter<F::Element>, DbError> {
        let result = self.scope.select(self.factory.key_columns(), self.distinct)?;
        Ok(decode_all(&result, &self.mapper)?.into_iter())
    }

    /// Remove every row matching `element`; returns whether one existed.
    ///
    /// Existence is read first, then the delete runs. The two statements are
    /// not atomic.
    pub fn remove(&self, element: &F::Element) -> Result<bool, DbError> {
        let selection = self.factory.scalar(element);
        if !self.scope.exists(&selection)? {
            return Ok(false);
        }
        self.scope.delete(&selection)?;
        Ok(true)
    }

    /// Remove all rows matching any of `elements`.
    pub fn remove_all(&self, elements: &[F::Element]) -> Result<bool, DbError> {
        if elements.is_empty() {
            return Ok(false);
        }
        Ok(self.scope.delete(&self.factory.set(elements)?)? > 0)
    }

    /// Remove all rows in scope not matching any of `elements`.
    pub fn retain_all(&self, elements: &[F::Element]) -> Result<bool, DbError> {
        Ok(self.scope.delete_excluding(&self.factory.set(elements)?)? > 0)
    }

    pub fn clear(&self) -> Result<(), DbError> {
        self.scope.delete(&Selection::all())?;
        Ok(())
    }

    pub fn add(&self, _element: &F::Element) -> Result<bool, DbError> {
        Err(DbError::Unsupported { operation: "add" })
    }

    pub fn add_all(&self, _elements: &[F::Element]) -> Result<bool, DbError> {
        Err(DbError::Unsupported { operation: "add_all" })
    }
}

/// Set view: like [`DbCollection`], but size and iteration are distinct.
#[derive(Debug, Clone)]
pub struct DbSet<'a, F, M>(DbCollection<'a, F, M>);

impl<'a, F, M> DbSet<'a, F, M>
where
    F: SelectionFactory,
    M: RowMapper<Output = F::Element>,
{
    pub fn new(scope: Scope<'a>, factory: F, mapper: M) -> Self {
        let mut inner = DbCollection::new(scope, factory, mapper);
        inner.distinct = true;
        Self(inner)
    }
}

impl<'a, F, M> Deref for DbSet<'a, F, M> {
    type Target = DbCollection<'a, F, M>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
