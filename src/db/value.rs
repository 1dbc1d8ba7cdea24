//! Raw values exchanged with the backends.
//!
//! `DataValue` is the backend-agnostic cell representation: what a parameter
//! binds and what a result column decodes from. The relation itself only ever
//! stores blobs; integers appear in counts and existence checks, text only if
//! another writer stored strings in the relation.

use std::fmt;

use serde::{Serialize, Serializer};

use super::DbError;

/// A single raw value bound to or read from a statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataValue {
    Null,
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl DataValue {
    /// Get type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Int(_) => "integer",
            DataValue::Text(_) => "text",
            DataValue::Bytes(_) => "blob",
        }
    }

    /// Extract the raw bytes of a blob or text value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DataValue::Bytes(b) => Some(b),
            DataValue::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Extract an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for DataValue {
    fn from(value: Vec<u8>) -> Self {
        DataValue::Bytes(value)
    }
}

impl From<&[u8]> for DataValue {
    fn from(value: &[u8]) -> Self {
        DataValue::Bytes(value.to_vec())
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "NULL"),
            DataValue::Int(i) => write!(f, "{i}"),
            DataValue::Text(s) => write!(f, "{s}"),
            DataValue::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "{s}"),
                Err(_) => write!(f, "0x{}", hex::encode(b)),
            },
        }
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataValue::Null => serializer.serialize_none(),
            DataValue::Int(i) => serializer.serialize_i64(*i),
            other => serializer.collect_str(other),
        }
    }
}

/// Conversion of a borrowed Rust value into a bindable `DataValue`.
pub trait ToDataValue {
    fn to_data_value(&self) -> DataValue;
}

impl ToDataValue for Vec<u8> {
    fn to_data_value(&self) -> DataValue {
        DataValue::Bytes(self.clone())
    }
}

impl ToDataValue for [u8] {
    fn to_data_value(&self) -> DataValue {
        DataValue::Bytes(self.to_vec())
    }
}

impl ToDataValue for i64 {
    fn to_data_value(&self) -> DataValue {
        DataValue::Int(*self)
    }
}

impl ToDataValue for String {
    fn to_data_value(&self) -> DataValue {
        DataValue::Text(self.clone())
    }
}

impl ToDataValue for DataValue {
    fn to_data_value(&self) -> DataValue {
        self.clone()
    }
}

/// Decoding of a result value into a Rust type.
///
/// Decoding never coerces between unrelated representations: asking for an
/// integer from a blob column is a `DbError::TypeMismatch`.
pub trait FromDataValue: Sized {
    fn from_data_value(value: &DataValue) -> Result<Self, DbError>;
}

impl FromDataValue for Vec<u8> {
    fn from_data_value(value: &DataValue) -> Result<Self, DbError> {
        value
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or(DbError::TypeMismatch {
                expected: "blob",
                found: value.type_name(),
            })
    }
}

impl FromDataValue for i64 {
    fn from_data_value(value: &DataValue) -> Result<Self, DbError> {
        value.as_i64().ok_or(DbError::TypeMismatch {
            expected: "integer",
            found: value.type_name(),
        })
    }
}

impl FromDataValue for String {
    fn from_data_value(value: &DataValue) -> Result<Self, DbError> {
        match value {
            DataValue::Text(s) => Ok(s.clone()),
            DataValue::Bytes(b) => Ok(String::from_utf8(b.clone())?),
            other => Err(DbError::TypeMismatch {
                expected: "text",
                found: other.type_name(),
            }),
        }
    }
}

impl FromDataValue for DataValue {
    fn from_data_value(value: &DataValue) -> Result<Self, DbError> {
        Ok(value.clone())
    }
}
