//! Source of "today" for grid highlighting.

use crate::calendar::date::EventDate;
use chrono::{Datelike, Local, NaiveDate};

/// Supplies the current calendar date.
pub trait Clock {
    fn today(&self) -> EventDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> EventDate {
        from_naive(Local::now().date_naive())
    }
}

/// Clock pinned to one date, for deterministic callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub EventDate);

impl Clock for FixedClock {
    fn today(&self) -> EventDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> EventDate {
        (**self).today()
    }
}

fn from_naive(date: NaiveDate) -> EventDate {
    EventDate::from_trusted(date.year(), date.month(), date.day())
}
