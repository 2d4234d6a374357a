//! Schema history for the planbook store.
//!
//! | version | file             | adds                                   |
//! |---------|------------------|----------------------------------------|
//! | 1       | `0001_init.sql`  | `events`, `tasks`, per-user indexes    |
//!
//! Pending steps run inside one transaction, so a store is either fully at
//! the new version or untouched. Released SQL files are never edited; schema
//! changes land as a new numbered file appended to [`MIGRATIONS`].

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Schema version a fully migrated store reports.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `DbError::Sqlite` when a step fails; earlier steps are rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        debug!("event=db_migrate module=db status=skip version={latest}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in MIGRATIONS.iter().filter(|step| step.version > from_version) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

/// Reads the schema version recorded on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}
