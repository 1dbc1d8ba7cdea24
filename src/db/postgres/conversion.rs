//! Type conversion utilities for the PostgreSQL backend.
//!
//! Handles conversion between:
//! - `:name` placeholders ↔ positional `$n` parameters
//! - `DataValue` ↔ PostgreSQL types (via `ToSql`/`FromSql`)

use ::postgres::types::{ToSql, Type};
use ::postgres::Row;

use crate::db::backend::Params;
use crate::db::value::DataValue;
use crate::db::DbError;

/// Statement text with positional placeholders and the parameter names in
/// `$n` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSql {
    pub sql: String,
    pub names: Vec<String>,
}

impl PositionalSql {
    /// Values for one parameter set, in `$n` order.
    pub fn bind(&self, params: &Params) -> Result<Vec<DataValue>, DbError> {
        self.names
            .iter()
            .map(|name| {
                params
                    .get(name)
                    .cloned()
                    .ok_or_else(|| DbError::MissingParameter { name: name.clone() })
            })
            .collect()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Rewrite `:name` placeholders to `$1, $2, ...`.
///
/// A name used twice maps to the same position. `::` casts and quoted
/// literals are left untouched.
pub fn to_positional(sql: &str) -> PositionalSql {
    let mut out = String::with_capacity(sql.len());
    let mut names: Vec<String> = Vec::new();
    let mut chars = sql.chars().peekable();
    let mut in_literal = false;

    while let Some(c) = chars.next() {
        if in_literal {
            out.push(c);
            if c == '\'' {
                in_literal = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_literal = true;
                out.push(c);
            }
            ':' if chars.peek() == Some(&':') => {
                out.push_str("::");
                chars.next();
            }
            ':' if chars.peek().copied().is_some_and(is_ident_start) => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                let position = match names.iter().position(|n| *n == name) {
                    Some(idx) => idx + 1,
                    None => {
                        names.push(name);
                        names.len()
                    }
                };
                out.push('$');
                out.push_str(&position.to_string());
            }
            _ => out.push(c),
        }
    }

    PositionalSql { sql: out, names }
}

/// Box a raw value as a PostgreSQL parameter.
pub fn to_sql_param(value: &DataValue) -> Box<dyn ToSql + Sync> {
    match value {
        DataValue::Null => Box::new(Option::<Vec<u8>>::None),
        DataValue::Int(i) => Box::new(*i),
        DataValue::Text(s) => Box::new(s.clone()),
        DataValue::Bytes(b) => Box::new(b.clone()),
    }
}

/// Decode every column of a result row into raw values.
pub fn row_values(row: &Row) -> Result<Vec<DataValue>, DbError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| column_value(row, idx, column.type_()))
        .collect()
}

fn column_value(row: &Row, idx: usize, ty: &Type) -> Result<DataValue, DbError> {
    let value = if *ty == Type::BYTEA {
        row.try_get::<_, Option<Vec<u8>>>(idx)?.map(DataValue::Bytes)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(DataValue::Int)
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?
            .map(|i| DataValue::Int(i64::from(i)))
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?
            .map(|i| DataValue::Int(i64::from(i)))
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?
            .map(|b| DataValue::Int(i64::from(b)))
    } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(ty) {
        row.try_get::<_, Option<String>>(idx)?.map(DataValue::Text)
    } else {
        return Err(DbError::QueryFailed {
            message: format!("unsupported column type '{ty}'"),
        });
    };
    Ok(value.unwrap_or(DataValue::Null))
}
