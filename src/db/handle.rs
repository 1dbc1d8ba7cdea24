//! The relation-bound connection handle.
//!
//! A `RelationHandle` pairs one backend with the name of the relation it
//! serves. The table facade owns it and every view borrows it; once closed or
//! dropped, every call fails with `DbError::Closed` instead of reaching the
//! backend.

use super::backend::{DatabaseBackend, Dialect, Params, QueryResult};
use super::escape::validate_identifier;
use super::schema;
use super::DbError;

pub struct RelationHandle {
    relation: String,
    backend: Option<Box<dyn DatabaseBackend>>,
}

impl RelationHandle {
    /// Bind a backend to a relation name.
    ///
    /// The name is the only text spliced into statements, so it must be a
    /// plain identifier.
    pub fn new(relation: &str, backend: Box<dyn DatabaseBackend>) -> Result<Self, DbError> {
        validate_identifier(relation)?;
        Ok(Self {
            relation: relation.to_string(),
            backend: Some(backend),
        })
    }

    /// Relation name.
    pub fn name(&self) -> &str {
        &self.relation
    }

    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&dyn DatabaseBackend, DbError> {
        self.backend.as_deref().ok_or_else(|| DbError::Closed {
            relation: self.relation.clone(),
        })
    }

    /// Dialect of the underlying backend.
    pub fn dialect(&self) -> Result<Dialect, DbError> {
        Ok(self.backend()?.dialect())
    }

    /// Run a query and return every row.
    pub fn query(&self, sql: &str, params: &Params) -> Result<QueryResult, DbError> {
        let backend = self.backend()?;
        tracing::debug!(relation = %self.relation, sql, params = params.len(), "query");
        backend.execute_query(sql, params)
    }

    /// Run a statement and return the affected row count.
    pub fn execute(&self, sql: &str, params: &Params) -> Result<usize, DbError> {
        let backend = self.backend()?;
        tracing::debug!(relation = %self.relation, sql, params = params.len(), "execute");
        backend.execute_statement(sql, params)
    }

    /// Run one statement per parameter set in a single transaction.
    pub fn batch(&self, sql: &str, batch: &[Params]) -> Result<usize, DbError> {
        let backend = self.backend()?;
        tracing::debug!(relation = %self.relation, sql, rows = batch.len(), "batch");
        backend.execute_batch(sql, batch)
    }

    /// Create the relation if it does not exist yet.
    pub fn create_if_absent(&self) -> Result<(), DbError> {
        let sql = schema::create_relation(self.dialect()?, &self.relation);
        self.execute(&sql, &Params::new())?;
        tracing::debug!(relation = %self.relation, "relation ready");
        Ok(())
    }

    /// Release the backend. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), DbError> {
        match self.backend.take() {
            Some(backend) => {
                tracing::debug!(relation = %self.relation, "closing");
                backend.close()
            }
            None => Ok(()),
        }
    }

    /// Drop the relation and release the backend.
    pub fn drop_relation(&mut self) -> Result<(), DbError> {
        self.execute(&schema::drop_relation(&self.relation), &Params::new())?;
        tracing::info!(relation = %self.relation, "dropped relation");
        self.close()
    }
}

impl std::fmt::Debug for RelationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationHandle")
            .field("relation", &self.relation)
            .field(
                "backend",
                &self.backend.as_ref().map(|b| b.backend_name()),
            )
            .finish()
    }
}
