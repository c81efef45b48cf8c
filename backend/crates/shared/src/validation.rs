//! Request Validation Rules
//!
//! Small, static field checks shared by every request payload. Each
//! feature crate composes these into a validated input struct before any
//! business logic runs; a failed check is an explicit [`ValidationError`],
//! never a panic.

use thiserror::Error;

use crate::id::Id;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be a positive integer")]
    NotPositive { field: &'static str },

    #[error("{field} must be a valid identifier")]
    InvalidId { field: &'static str },

    #[error("{field} is invalid")]
    Invalid { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::NotANumber { field }
            | ValidationError::NotPositive { field }
            | ValidationError::InvalidId { field }
            | ValidationError::Invalid { field } => field,
        }
    }
}

/// Trimmed text with a minimum length counted in characters.
///
/// Returns the trimmed value, which is what gets stored.
pub fn required_text(
    field: &'static str,
    value: Option<&str>,
    min_chars: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?.trim();
    if value.chars().count() < min_chars {
        return Err(ValidationError::TooShort {
            field,
            min: min_chars,
        });
    }
    Ok(value.to_string())
}

/// Nullable integer coming from a form field or query string.
///
/// Absent, empty and the literal `null` all mean "no value".
pub fn optional_int(field: &'static str, value: Option<&str>) -> Result<Option<i32>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ValidationError::NotANumber { field }),
    }
}

/// Optional strictly positive integer (page numbers, page sizes).
pub fn optional_positive(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<u32>, ValidationError> {
    match optional_int(field, value)? {
        None => Ok(None),
        Some(n) if n > 0 => Ok(Some(n as u32)),
        Some(_) => Err(ValidationError::NotPositive { field }),
    }
}

/// Required UUID v4 identifier
pub fn required_id<T>(field: &'static str, value: Option<&str>) -> Result<Id<T>, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    Id::parse_v4(value).ok_or(ValidationError::InvalidId { field })
}
