//! Core domain logic for planbook.
//! This crate is the single source of truth for calendar layout and record
//! invariants; presentation layers only render what it returns.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::clock::{Clock, FixedClock, SystemClock};
pub use calendar::date::{days_in_month, is_leap_year, DateParseError, EventDate};
pub use calendar::grid::{build_month_grid, CalendarError, DayCell, MonthGrid, WEEKDAY_HEADERS};
pub use calendar::view::{advance_month, CalendarViewState};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::edit::{EditError, EditField, EditRequest};
pub use model::event::{CalendarEvent, EventId, NewEvent};
pub use model::task::{Effort, NewTask, Priority, Task, TaskId, TaskStatus};
pub use model::task_sort::{sort_tasks, toggle_sort, SortColumn, SortDirection, TaskSort};
pub use model::validation::ValidationError;
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::calendar_service::{CalendarService, CalendarServiceError};
pub use service::task_service::{TaskListResult, TaskService, TaskServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
