//! Planbook's on-disk store.
//!
//! One SQLite file holds the `events` and `tasks` tables for every local
//! user; rows are partitioned by `user_id`, not by file.
//!
//! # Responsibility
//! - Open the store with foreign keys and a busy timeout configured.
//! - Bring the schema up to [`latest_version`] before handing out a
//!   connection.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; repositories compare
//!   against it in `try_new` and refuse anything else.
//! - A store written by a newer build is rejected, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::latest_version;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Store was last migrated by a newer planbook build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "planbook store is at schema v{db_version}; this build reads up to v{latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
