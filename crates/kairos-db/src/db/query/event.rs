//! Query composition for `event`.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use kairos_core::types::DayCode;

use crate::db::connection::DbConnection;
use crate::db::enums::Frequency;
use crate::db::schema::event;
use crate::model::event::{Event, EventChangeset, NewEvent};

/// ## Summary
/// Inserts an event and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_event: &NewEvent<'_>) -> QueryResult<Event> {
    diesel::insert_into(event::table)
        .values(new_event)
        .returning(Event::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads an event by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn by_id(conn: &mut DbConnection<'_>, id: i32) -> QueryResult<Option<Event>> {
    event::table
        .find(id)
        .select(Event::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Lists events by active flag, optionally narrowed by frequency and weekday,
/// ordered by start date.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    frequency: Option<Frequency>,
    day: Option<DayCode>,
    active: bool,
) -> QueryResult<Vec<Event>> {
    let mut query = event::table
        .filter(event::is_active.eq(active))
        .select(Event::as_select())
        .into_boxed();

    if let Some(frequency) = frequency {
        query = query.filter(event::frequency.eq(frequency));
    }

    if let Some(day) = day {
        query = query.filter(event::days_of_week.like(format!("%{day}%")));
    }

    query
        .order((event::start_date.asc(), event::id.asc()))
        .load(conn)
        .await
}

/// ## Summary
/// Replaces the editable columns of an event.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: i32,
    changes: &EventChangeset<'_>,
) -> QueryResult<Option<Event>> {
    diesel::update(event::table.find(id))
        .set(changes)
        .returning(Event::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Sets the active flag of an event, leaving every other column untouched.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn set_active(
    conn: &mut DbConnection<'_>,
    id: i32,
    active: bool,
) -> QueryResult<Option<Event>> {
    diesel::update(event::table.find(id))
        .set((event::is_active.eq(active), event::updated_at.eq(Utc::now())))
        .returning(Event::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Permanently deletes an event. Returns the number of removed rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: i32) -> QueryResult<usize> {
    diesel::delete(event::table.find(id)).execute(conn).await
}
