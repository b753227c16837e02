use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::recurrence::{DaySet, Frequency};

/// Stored event definition, as handed out by the event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<DaySet>,
    pub recurring_end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventDefinition {
    /// Length of every occurrence generated from this definition.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_date.signed_duration_since(self.start_date)
    }
}

/// One concrete calendar instance of an event definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Derived key `"{source_id}-{start epoch millis}"`.
    pub id: String,
    pub source_id: i32,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_recurring: bool,
}

impl Occurrence {
    #[must_use]
    pub fn new(source: &EventDefinition, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: Self::key(source.id, start),
            source_id: source.id,
            title: source.title.clone(),
            start,
            end,
            is_recurring: source.is_recurring,
        }
    }

    /// ## Summary
    /// Builds the occurrence key for a source id and start timestamp.
    #[must_use]
    pub fn key(source_id: i32, start: NaiveDateTime) -> String {
        format!("{source_id}-{}", start.and_utc().timestamp_millis())
    }

    /// ## Summary
    /// Maps an occurrence key back to the id of its source definition.
    #[must_use]
    pub fn source_id_of(key: &str) -> Option<i32> {
        let (source, _) = key.split_once('-')?;
        source.parse().ok()
    }
}
