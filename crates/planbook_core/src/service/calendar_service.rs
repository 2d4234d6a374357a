//! Calendar use-case service.
//!
//! # Responsibility
//! - Load one month: fetch the user's events, then build the grid.
//! - Add, edit and delete events through validated inputs.
//!
//! # Invariants
//! - Fetch and build are strictly sequential; the grid is built from a
//!   snapshot and never mutated afterwards.
//! - Edits are applied only when their `old_value` still matches storage.
//! - Deletes require explicit confirmation.
//! - Logs carry ids, counts and timings only, never titles or notes.

use crate::calendar::clock::Clock;
use crate::calendar::date::EventDate;
use crate::calendar::grid::{build_month_grid, ensure_month, CalendarError, MonthGrid};
use crate::calendar::view::CalendarViewState;
use crate::model::edit::{EditError, EditRequest};
use crate::model::event::{CalendarEvent, NewEvent};
use crate::model::validation::ValidationError;
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for calendar use-cases.
#[derive(Debug)]
pub enum CalendarServiceError {
    Grid(CalendarError),
    Validation(ValidationError),
    Edit(EditError),
    EventNotFound(String),
    Repo(RepoError),
}

impl Display for CalendarServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Edit(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CalendarServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Edit(err) => Some(err),
            Self::EventNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<CalendarError> for CalendarServiceError {
    fn from(value: CalendarError) -> Self {
        Self::Grid(value)
    }
}

impl From<ValidationError> for CalendarServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<EditError> for CalendarServiceError {
    fn from(value: EditError) -> Self {
        Self::Edit(value)
    }
}

impl From<RepoError> for CalendarServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EventNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::InvalidArgument(err) => Self::Grid(err),
            other => Self::Repo(other),
        }
    }
}

pub type CalendarServiceResult<T> = Result<T, CalendarServiceError>;

/// Calendar facade over an event repository and a clock.
pub struct CalendarService<R: EventRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: EventRepository, C: Clock> CalendarService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Current date according to the service clock.
    pub fn today(&self) -> EventDate {
        self.clock.today()
    }

    /// View state for the month containing today.
    pub fn current_view(&self) -> CalendarViewState {
        CalendarViewState::containing(self.clock.today())
    }

    /// Fetches the user's events for `view` and lays out the month grid.
    ///
    /// # Errors
    /// - `CalendarServiceError::Grid` when `view.month > 11`; nothing is fetched.
    pub fn load_month(
        &self,
        user_id: &str,
        view: CalendarViewState,
    ) -> CalendarServiceResult<MonthGrid> {
        ensure_month(view.month)?;
        let started_at = Instant::now();
        let events = self
            .repo
            .list_events_in_month(user_id, view.year, view.month)
            .map_err(|err| {
                error!(
                    "event=calendar_load module=calendar status=error year={} month={} duration_ms={} error={}",
                    view.year,
                    view.month,
                    started_at.elapsed().as_millis(),
                    err
                );
                err
            })?;

        let grid = build_month_grid(view.year, view.month, &events, self.clock.today())?;
        info!(
            "event=calendar_load module=calendar status=ok year={} month={} events={} cells={} duration_ms={}",
            view.year,
            view.month,
            events.len(),
            grid.cells().len(),
            started_at.elapsed().as_millis()
        );
        Ok(grid)
    }

    /// All of the user's events ordered by date, for list views.
    pub fn list_events(&self, user_id: &str) -> CalendarServiceResult<Vec<CalendarEvent>> {
        Ok(self.repo.list_events(user_id)?)
    }

    /// Looks up one event.
    pub fn find_event(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> CalendarServiceResult<Option<CalendarEvent>> {
        Ok(self.repo.get_event(user_id, event_id)?)
    }

    /// Validates form input and stores a new event.
    pub fn add_event(&self, user_id: &str, form: NewEvent) -> CalendarServiceResult<CalendarEvent> {
        let event = form.into_event()?;
        self.repo.insert_event(user_id, &event)?;
        info!(
            "event=event_write module=calendar action=insert status=ok event_id={}",
            event.id
        );
        Ok(event)
    }

    /// Applies one validated field edit and returns the stored event.
    ///
    /// No-op edits skip the write and return the current event.
    pub fn apply_edit(
        &self,
        user_id: &str,
        event_id: &str,
        request: &EditRequest,
    ) -> CalendarServiceResult<CalendarEvent> {
        let current = self
            .repo
            .get_event(user_id, event_id)?
            .ok_or_else(|| CalendarServiceError::EventNotFound(event_id.to_string()))?;

        let updated = request.apply_to(&current)?;
        if updated == current {
            debug!(
                "event=event_write module=calendar action=update status=skipped event_id={} field={}",
                event_id,
                request.field.as_str()
            );
            return Ok(current);
        }

        self.repo.update_event(user_id, &updated)?;
        info!(
            "event=event_write module=calendar action=update status=ok event_id={} field={}",
            event_id,
            request.field.as_str()
        );
        Ok(updated)
    }

    /// Deletes an event when `confirmed`; returns whether a delete happened.
    pub fn delete_event(
        &self,
        user_id: &str,
        event_id: &str,
        confirmed: bool,
    ) -> CalendarServiceResult<bool> {
        if !confirmed {
            debug!(
                "event=event_write module=calendar action=delete status=skipped event_id={}",
                event_id
            );
            return Ok(false);
        }

        self.repo.delete_event(user_id, event_id)?;
        info!(
            "event=event_write module=calendar action=delete status=ok event_id={}",
            event_id
        );
        Ok(true)
    }
}
