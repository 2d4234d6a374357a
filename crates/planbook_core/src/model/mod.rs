//! Domain records owned by the productivity pages.
//!
//! # Responsibility
//! - Define calendar events, tasks and the edit intents that change them.
//! - Keep field-level validation next to the records it protects.
//!
//! # Invariants
//! - Every record is identified by an opaque, stable string id.
//! - Records are validated before any repository write.

pub mod edit;
pub mod event;
pub mod task;
pub mod task_sort;
pub mod validation;
