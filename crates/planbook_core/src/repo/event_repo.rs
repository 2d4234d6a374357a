//! Event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide user-scoped CRUD over the `events` table.
//! - Offer a month pre-filter so callers need not fetch every event.
//!
//! # Invariants
//! - `date` is stored as the canonical `YYYY-MM-DD` text and matched as text.
//! - Lists are ordered by calendar date, then insertion order, so same-day
//!   events keep the order they were created in. Text order of `date` is not
//!   calendar order for negative or five-digit years, so the date ordering
//!   happens after decoding.
//! - Read paths reject undecodable rows instead of masking them.

use crate::calendar::date::EventDate;
use crate::calendar::grid::ensure_month;
use crate::model::event::{CalendarEvent, EventId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const EVENT_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "title",
    "date",
    "notes",
    "created_at",
    "updated_at",
];

const EVENT_SELECT_SQL: &str = "SELECT id, title, date, notes FROM events";

/// Persistence contract for calendar events.
pub trait EventRepository {
    fn insert_event(&self, user_id: &str, event: &CalendarEvent) -> RepoResult<EventId>;
    fn update_event(&self, user_id: &str, event: &CalendarEvent) -> RepoResult<()>;
    fn get_event(&self, user_id: &str, id: &str) -> RepoResult<Option<CalendarEvent>>;
    /// Hard-deletes one event.
    fn delete_event(&self, user_id: &str, id: &str) -> RepoResult<()>;
    fn list_events(&self, user_id: &str) -> RepoResult<Vec<CalendarEvent>>;
    /// Lists events dated inside `year` / zero-based `month`.
    fn list_events_in_month(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> RepoResult<Vec<CalendarEvent>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "events", EVENT_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_events(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn list_in_date_order(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<CalendarEvent>> {
        let mut events = self.query_events(sql, params)?;
        // Stable: rows arrive in insertion order.
        events.sort_by_key(|event| event.date);
        Ok(events)
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn insert_event(&self, user_id: &str, event: &CalendarEvent) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (id, user_id, title, date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                event.id.as_str(),
                user_id,
                event.title.as_str(),
                event.date.to_string(),
                event.notes.as_deref(),
            ],
        )?;

        Ok(event.id.clone())
    }

    fn update_event(&self, user_id: &str, event: &CalendarEvent) -> RepoResult<()> {
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                title = ?1,
                date = ?2,
                notes = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4 AND user_id = ?5;",
            params![
                event.title.as_str(),
                event.date.to_string(),
                event.notes.as_deref(),
                event.id.as_str(),
                user_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id.clone()));
        }
        Ok(())
    }

    fn get_event(&self, user_id: &str, id: &str) -> RepoResult<Option<CalendarEvent>> {
        let sql = format!("{EVENT_SELECT_SQL} WHERE id = ?1 AND user_id = ?2;");
        Ok(self.query_events(&sql, params![id, user_id])?.into_iter().next())
    }

    fn delete_event(&self, user_id: &str, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM events WHERE id = ?1 AND user_id = ?2;",
            params![id, user_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn list_events(&self, user_id: &str) -> RepoResult<Vec<CalendarEvent>> {
        let sql = format!(
            "{EVENT_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        );
        self.list_in_date_order(&sql, params![user_id])
    }

    fn list_events_in_month(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> RepoResult<Vec<CalendarEvent>> {
        let prefix = month_prefix(year, month)?;
        let sql = format!(
            "{EVENT_SELECT_SQL}
             WHERE user_id = ?1
               AND substr(date, 1, ?3) = ?2
             ORDER BY created_at ASC, rowid ASC;"
        );
        let prefix_len = prefix.chars().count() as i64;
        self.list_in_date_order(&sql, params![user_id, prefix, prefix_len])
    }
}

/// `YYYY-MM-` prefix shared by every date in the month.
fn month_prefix(year: i32, month: u32) -> RepoResult<String> {
    ensure_month(month)?;
    let rendered = EventDate::from_trusted(year, month + 1, 1).to_string();
    Ok(rendered[..rendered.len() - 2].to_string())
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<CalendarEvent> {
    let id: String = row.get("id")?;
    let date_text: String = row.get("date")?;
    let date = EventDate::parse(&date_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in events.date: {err}"))
    })?;

    let event = CalendarEvent {
        id,
        title: row.get("title")?,
        date,
        notes: row.get("notes")?,
    };
    event.validate()?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::month_prefix;
    use crate::calendar::grid::CalendarError;
    use crate::repo::RepoError;

    #[test]
    fn month_prefix_is_zero_padded() {
        assert_eq!(month_prefix(2024, 0).expect("prefix"), "2024-01-");
        assert_eq!(month_prefix(987, 11).expect("prefix"), "0987-12-");
        assert_eq!(month_prefix(-44, 2).expect("prefix"), "-0044-03-");
    }

    #[test]
    fn month_prefix_rejects_invalid_month() {
        assert!(matches!(
            month_prefix(2024, 12),
            Err(RepoError::InvalidArgument(CalendarError::InvalidArgument { month: 12 }))
        ));
    }
}
