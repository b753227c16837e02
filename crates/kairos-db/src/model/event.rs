use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::{pg::Pg, prelude::*};

use kairos_core::types::{DaySet, EventDefinition};

use crate::db::{enums::Frequency, schema};

/// Stored event definition row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::event)]
#[diesel(check_for_backend(Pg))]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<String>,
    pub recurring_end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert struct for creating new events
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::event)]
pub struct NewEvent<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<String>,
    pub recurring_end_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Full replacement of the user-editable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::event)]
#[diesel(treat_none_as_null = true)]
pub struct EventChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<String>,
    pub recurring_end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDefinition {
    fn from(row: Event) -> Self {
        let days_of_week = row.days_of_week.as_deref().and_then(|raw| {
            raw.parse::<DaySet>()
                .inspect_err(|e| {
                    tracing::warn!(event_id = row.id, raw, error = %e, "Ignoring unreadable days_of_week");
                })
                .ok()
        });

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            is_recurring: row.is_recurring,
            frequency: row.frequency.map(Into::into),
            days_of_week,
            recurring_end_date: row.recurring_end_date,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
