//! db_table library - relational (row, column, value) tables as lazy collections
//!
//! A `DbTable` stores cells in one SQL relation of three blob columns and hands
//! out Map, Set and Collection views over it. Views hold no data: every
//! operation is a single parameterized statement against SQLite or
//! PostgreSQL.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod db;
pub mod mapper;
pub mod output;
pub mod selection;
pub mod table;
pub mod types;
pub mod views;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;

pub use codec::{Codec, JsonCodec, RawCodec, TypedTable, Utf8Codec};
pub use db::{DatabaseConfig, DbError};
pub use table::DbTable;
pub use types::{Bytes, Cell, Entry};
