//! Identifier validation for relation names.
//!
//! Values are always bound as parameters. The relation name is the only text
//! spliced into statements, so it is restricted to a plain SQL identifier.

use super::DbError;

/// Check that `name` is usable as an unquoted SQL identifier.
///
/// Accepts ASCII letters, digits and `_`, not starting with a digit.
pub fn validate_identifier(name: &str) -> Result<&str, DbError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(name)
    } else {
        Err(DbError::InvalidName {
            name: name.to_string(),
        })
    }
}
