//! Calendar navigation state.
//!
//! Navigation never mutates shared state: each step takes a
//! [`CalendarViewState`] and returns the next one.

use crate::calendar::date::{month_name, EventDate};
use crate::calendar::grid::{ensure_month, CalendarError};
use serde::{Deserialize, Serialize};

/// Month currently shown by a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarViewState {
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
}

impl CalendarViewState {
    /// Creates a state for `year` / zero-based `month`.
    ///
    /// # Errors
    /// - `CalendarError::InvalidArgument` when `month > 11`.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        ensure_month(month)?;
        Ok(Self { year, month })
    }

    /// State for the month containing `date`.
    pub fn containing(date: EventDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Header text such as `March 2024`.
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn next(self) -> Self {
        advance_month(self, 1)
    }

    pub fn previous(self) -> Self {
        advance_month(self, -1)
    }
}

/// Moves `state` by `delta` months, wrapping across year boundaries.
///
/// Years saturate at the bounds of `i32`.
pub fn advance_month(state: CalendarViewState, delta: i32) -> CalendarViewState {
    let total = i64::from(state.year) * 12 + i64::from(state.month) + i64::from(delta);
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32;

    match i32::try_from(year) {
        Ok(year) => CalendarViewState { year, month },
        Err(_) if year < 0 => CalendarViewState {
            year: i32::MIN,
            month: 0,
        },
        Err(_) => CalendarViewState {
            year: i32::MAX,
            month: 11,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{advance_month, CalendarViewState};
    use crate::calendar::date::EventDate;
    use crate::calendar::grid::CalendarError;

    fn state(year: i32, month: u32) -> CalendarViewState {
        CalendarViewState::new(year, month).expect("valid state")
    }

    #[test]
    fn wraps_forward_and_backward_across_years() {
        assert_eq!(state(2023, 11).next(), state(2024, 0));
        assert_eq!(state(2024, 0).previous(), state(2023, 11));
        assert_eq!(advance_month(state(2024, 5), 0), state(2024, 5));
    }

    #[test]
    fn large_deltas_wrap_multiple_years() {
        assert_eq!(advance_month(state(2024, 1), 25), state(2026, 2));
        assert_eq!(advance_month(state(2024, 1), -14), state(2022, 11));
    }

    #[test]
    fn saturates_at_year_bounds() {
        assert_eq!(advance_month(state(i32::MAX, 11), 1), state(i32::MAX, 11));
        assert_eq!(advance_month(state(i32::MIN, 0), -1), state(i32::MIN, 0));
    }

    #[test]
    fn rejects_out_of_range_month_and_formats_title() {
        assert_eq!(
            CalendarViewState::new(2024, 12),
            Err(CalendarError::InvalidArgument { month: 12 })
        );
        let date = EventDate::new(2024, 3, 15).expect("valid date");
        assert_eq!(CalendarViewState::containing(date).title(), "March 2024");
    }
}
