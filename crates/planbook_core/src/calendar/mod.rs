//! Calendar core: dates, month grid layout and navigation.
//!
//! # Responsibility
//! - Turn a `(year, month)` pair plus fetched events into a renderable grid.
//! - Keep all date arithmetic timezone-free and deterministic.
//!
//! # Invariants
//! - Nothing in this module performs I/O or reads the wall clock directly;
//!   "today" always arrives through [`clock::Clock`].

pub mod clock;
pub mod date;
pub mod grid;
pub mod view;
