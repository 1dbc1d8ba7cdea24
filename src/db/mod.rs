//! Database connection and statement execution for table relations.
//!
//! This module provides the storage collaborator the table views run on:
//! - Backend abstraction (`DatabaseBackend`) over SQLite and PostgreSQL
//! - Raw values (`DataValue`) and conversions to and from Rust types
//! - The relation schema and its DDL
//! - The relation-bound handle shared by every view of a table
//!
//! # Architecture
//!
//! Every table is one relation of three blob columns: row key, column key and
//! value, with `(row, column)` as the primary key. Views never cache; each
//! operation renders a parameterized statement and runs it through the
//! `RelationHandle` owned by the table facade.
//!
//! # Type Decisions
//!
//! **Why raw `Vec<u8>` for keys and values instead of generics?**
//! The relation stores opaque byte sequences. Typed access is layered on top by
//! codecs (see `crate::codec`), so the storage layer never needs to know what
//! the bytes mean.
//!
//! **Why a `Dialect` instead of one SQL string per backend?**
//! The statements differ only in a handful of places (true/false literals,
//! blob type, upsert form). Keeping one set of templates parameterized by the
//! dialect keeps the views backend-agnostic.

mod backend;
pub mod config;
mod escape;
mod handle;
pub mod postgres;
pub mod schema;
mod sqlite;
mod value;

pub use backend::{DatabaseBackend, Dialect, Params, QueryResult, ResultRow};
pub use config::{DatabaseConfig, PostgresConfig};
pub use escape::validate_identifier;
pub use handle::RelationHandle;
pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;
pub use value::{DataValue, FromDataValue, ToDataValue};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Relation '{relation}' has been closed")]
    Closed { relation: String },

    #[error("Operation '{operation}' is not supported by this view")]
    Unsupported { operation: &'static str },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },

    #[error("Missing value for parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Invalid relation name '{name}': only ASCII letters, digits and '_' are allowed")]
    InvalidName { name: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Postgres(#[from] ::postgres::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}
