//! Explicit edit intents for calendar events.
//!
//! # Responsibility
//! - Describe a single-field change as data (`field`, `old_value`, `new_value`).
//! - Validate the change and apply it to an event copy.
//!
//! # Invariants
//! - `old_value` must match the event's current value; stale edits are refused.
//! - Applying an edit never mutates the source event.

use crate::calendar::date::EventDate;
use crate::model::event::CalendarEvent;
use crate::model::validation::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editable event field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Title,
    Date,
    Notes,
}

impl EditField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Notes => "notes",
        }
    }

    /// Current value of this field on `event`, in edit-form text form.
    pub fn current_value(self, event: &CalendarEvent) -> String {
        match self {
            Self::Title => event.title.clone(),
            Self::Date => event.date.to_string(),
            Self::Notes => event.notes.clone().unwrap_or_default(),
        }
    }
}

/// Requested change of one event field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub field: EditField,
    pub old_value: String,
    pub new_value: String,
}

/// Reason an edit request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// New value fails field validation.
    Invalid(ValidationError),
    /// The event changed since the edit was prepared.
    Stale {
        field: EditField,
        expected: String,
        actual: String,
    },
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Stale {
                field,
                expected,
                actual,
            } => write!(
                f,
                "stale edit for {}: expected `{expected}`, found `{actual}`",
                field.as_str()
            ),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Stale { .. } => None,
        }
    }
}

impl From<ValidationError> for EditError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl EditRequest {
    pub fn new(field: EditField, old_value: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            field,
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    /// Prepares an edit against the event's current value.
    pub fn for_event(event: &CalendarEvent, field: EditField, new_value: impl Into<String>) -> Self {
        Self::new(field, field.current_value(event), new_value)
    }

    /// Returns whether applying this request would leave the field unchanged.
    pub fn is_noop(&self) -> bool {
        self.old_value == self.new_value
    }

    /// Validates the request and returns an updated copy of `event`.
    ///
    /// # Errors
    /// - `Stale` when `old_value` no longer matches `event`.
    /// - `Invalid` when the new value is blank (title) or not a date.
    pub fn apply_to(&self, event: &CalendarEvent) -> Result<CalendarEvent, EditError> {
        let actual = self.field.current_value(event);
        if actual != self.old_value {
            return Err(EditError::Stale {
                field: self.field,
                expected: self.old_value.clone(),
                actual,
            });
        }

        let mut updated = event.clone();
        match self.field {
            EditField::Title => {
                updated.title =
                    non_blank(&self.new_value).ok_or(ValidationError::EmptyField("title"))?;
            }
            EditField::Date => {
                updated.date = EventDate::parse(&self.new_value).map_err(ValidationError::from)?;
            }
            EditField::Notes => {
                updated.notes = non_blank(&self.new_value);
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditError, EditField, EditRequest};
    use crate::calendar::date::EventDate;
    use crate::model::event::CalendarEvent;
    use crate::model::validation::ValidationError;

    fn sample_event() -> CalendarEvent {
        let date = EventDate::new(2024, 3, 15).expect("valid date");
        CalendarEvent::with_id("e-1", "Standup", date).with_notes("room 4")
    }

    #[test]
    fn apply_updates_only_the_requested_field() {
        let event = sample_event();
        let request = EditRequest::for_event(&event, EditField::Date, "2024-03-18");

        let updated = request.apply_to(&event).expect("edit should apply");
        assert_eq!(updated.date.to_string(), "2024-03-18");
        assert_eq!(updated.title, event.title);
        assert_eq!(updated.notes, event.notes);
        assert_eq!(event.date.to_string(), "2024-03-15");
    }

    #[test]
    fn stale_old_value_is_rejected() {
        let event = sample_event();
        let request = EditRequest::new(EditField::Title, "Retro", "Planning");

        let err = request.apply_to(&event).expect_err("stale edit must fail");
        assert!(matches!(err, EditError::Stale { field: EditField::Title, .. }));
    }

    #[test]
    fn invalid_new_values_are_rejected() {
        let event = sample_event();

        let blank_title = EditRequest::for_event(&event, EditField::Title, "   ");
        assert_eq!(
            blank_title.apply_to(&event),
            Err(EditError::Invalid(ValidationError::EmptyField("title")))
        );

        let bad_date = EditRequest::for_event(&event, EditField::Date, "2024-02-30");
        assert!(matches!(
            bad_date.apply_to(&event),
            Err(EditError::Invalid(ValidationError::InvalidDate(_)))
        ));
    }

    #[test]
    fn clearing_notes_stores_none() {
        let event = sample_event();
        let request = EditRequest::for_event(&event, EditField::Notes, "");
        assert!(!request.is_noop());

        let updated = request.apply_to(&event).expect("edit should apply");
        assert_eq!(updated.notes, None);
    }
}
