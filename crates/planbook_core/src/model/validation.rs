//! Field-level validation errors shared by domain records.

use crate::calendar::date::DateParseError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a record was refused before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    EmptyField(&'static str),
    /// Date input is not a valid `YYYY-MM-DD` value.
    InvalidDate(DateParseError),
    /// A block reason was supplied for a task that is not blocked.
    BlockReasonWithoutBlock,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidDate(err) => write!(f, "invalid date: {err}"),
            Self::BlockReasonWithoutBlock => {
                write!(f, "block_reason is only allowed when status is Block")
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DateParseError> for ValidationError {
    fn from(value: DateParseError) -> Self {
        Self::InvalidDate(value)
    }
}

/// Trims `value` and maps blank input to `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
