//! Calendar event model.
//!
//! # Responsibility
//! - Define the date-stamped record rendered by the month grid.
//! - Convert raw form input into a validated event.
//!
//! # Invariants
//! - `date` is a plain calendar date; it carries no time or timezone.
//! - `title` is never blank once validated.
//! - Blank notes are stored as `None`.

use crate::calendar::date::EventDate;
use crate::model::validation::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque event identifier.
pub type EventId = String;

/// Date-stamped event owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    /// Serialized as `event` to match the stored row shape.
    #[serde(rename = "event")]
    pub title: String,
    pub date: EventDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CalendarEvent {
    /// Creates an event with a freshly generated id and no notes.
    pub fn new(title: impl Into<String>, date: EventDate) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, date)
    }

    /// Creates an event with a caller-provided id.
    pub fn with_id(id: impl Into<EventId>, title: impl Into<String>, date: EventDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            notes: None,
        }
    }

    /// Builder-style helper for notes; blank text clears them.
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = non_blank(notes);
        self
    }

    /// Validates invariants required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        Ok(())
    }
}

/// Raw add-event form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    /// Expected as `YYYY-MM-DD`.
    pub date: String,
    pub notes: String,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            notes: String::new(),
        }
    }

    /// Trims and validates the form, producing a new event.
    ///
    /// # Errors
    /// - `EmptyField("title")` / `EmptyField("date")` for blank input.
    /// - `InvalidDate` when the date does not parse.
    pub fn into_event(self) -> Result<CalendarEvent, ValidationError> {
        let title = non_blank(&self.title).ok_or(ValidationError::EmptyField("title"))?;
        if self.date.trim().is_empty() {
            return Err(ValidationError::EmptyField("date"));
        }
        let date = EventDate::parse(&self.date)?;
        Ok(CalendarEvent::new(title, date).with_notes(&self.notes))
    }
}
