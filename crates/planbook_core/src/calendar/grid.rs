//! Month grid layout and event placement.
//!
//! # Responsibility
//! - Lay out one month as complete Sunday-first weeks.
//! - Attach events to the in-month day they are dated on.
//!
//! # Invariants
//! - `cells.len() % 7 == 0`.
//! - Column 0 is Sunday; the first in-month cell sits in the real weekday
//!   column of the 1st.
//! - Each in-month event appears in exactly one cell, in arrival order.
//! - Spillover cells never carry events and are never marked as today.
//! - Building is pure: identical inputs yield identical grids.

use crate::calendar::date::{days_in_month, weekday, EventDate};
use crate::model::event::CalendarEvent;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DAYS_PER_WEEK: usize = 7;

/// Short weekday headers in grid column order.
pub const WEEKDAY_HEADERS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Grid construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Zero-based month outside `0..=11`.
    InvalidArgument { month: u32 },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { month } => {
                write!(f, "invalid month {month}; expected zero-based 0..=11")
            }
        }
    }
}

impl Error for CalendarError {}

/// Rejects zero-based months outside `0..=11`.
pub fn ensure_month(month: u32) -> Result<(), CalendarError> {
    if month > 11 {
        return Err(CalendarError::InvalidArgument { month });
    }
    Ok(())
}

/// One square of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// Day-of-month within whichever month the cell belongs to.
    pub day_number: u32,
    pub belongs_to_current_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

impl DayCell {
    fn spillover(day_number: u32) -> Self {
        Self {
            day_number,
            belongs_to_current_month: false,
            is_today: false,
            events: Vec::new(),
        }
    }
}

/// Rendered layout for one `(year, month)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Cells grouped into Sunday-first weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// In-month cells only, in day order.
    pub fn month_days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| cell.belongs_to_current_month)
    }
}

/// Builds the month grid for `year` / zero-based `month`.
///
/// `events` may hold any dates; only those inside the month are placed.
/// `today` is used solely to flag the matching in-month cell.
///
/// # Errors
/// - `CalendarError::InvalidArgument` when `month > 11`.
pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[CalendarEvent],
    today: EventDate,
) -> Result<MonthGrid, CalendarError> {
    ensure_month(month)?;

    let first_weekday = weekday(year, month, 1);
    let day_count = days_in_month(year, month);
    // December precedes January in every year, so the previous year is never needed.
    let prev_day_count = days_in_month(year, (month + 11) % 12);

    let mut buckets: Vec<Vec<CalendarEvent>> = vec![Vec::new(); day_count as usize];
    for event in events.iter().filter(|event| event.date.is_in_month(year, month)) {
        buckets[(event.date.day() - 1) as usize].push(event.clone());
    }

    let leading = first_weekday;
    let used = leading + day_count;
    let trailing = match used % DAYS_PER_WEEK as u32 {
        0 => 0,
        remainder => DAYS_PER_WEEK as u32 - remainder,
    };

    let mut cells = Vec::with_capacity((used + trailing) as usize);
    cells.extend((prev_day_count - leading + 1..=prev_day_count).map(DayCell::spillover));
    cells.extend(buckets.into_iter().zip(1..=day_count).map(|(events, day)| DayCell {
        day_number: day,
        belongs_to_current_month: true,
        is_today: today.is_in_month(year, month) && today.day() == day,
        events,
    }));
    cells.extend((1..=trailing).map(DayCell::spillover));

    Ok(MonthGrid { year, month, cells })
}
