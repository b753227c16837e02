use salvo::async_trait;

use kairos_core::types::{DayCode, EventDefinition, Frequency};

use super::input::EventDraft;
use crate::error::{ServiceError, ServiceResult};

/// Listing filter for event definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFilter {
    pub frequency: Option<Frequency>,
    pub day: Option<DayCode>,
    /// `true` lists active definitions, `false` only soft-deleted ones.
    pub active: bool,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            frequency: None,
            day: None,
            active: true,
        }
    }
}

impl EventFilter {
    /// ## Summary
    /// Builds a filter from the raw `frequency`, `day` and `stopped` query values.
    ///
    /// Blank values are ignored; `stopped=true` selects inactive definitions.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` for an unknown frequency or weekday code.
    pub fn from_query(
        frequency: Option<&str>,
        day: Option<&str>,
        stopped: Option<&str>,
    ) -> ServiceResult<Self> {
        let frequency = non_blank(frequency)
            .map(str::parse::<Frequency>)
            .transpose()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
        let day = non_blank(day)
            .map(str::parse::<DayCode>)
            .transpose()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        Ok(Self {
            frequency,
            day,
            active: stopped != Some("true"),
        })
    }

    #[must_use]
    pub fn matches(&self, definition: &EventDefinition) -> bool {
        definition.is_active == self.active
            && self
                .frequency
                .is_none_or(|frequency| definition.frequency == Some(frequency))
            && self.day.is_none_or(|day| {
                definition
                    .days_of_week
                    .is_some_and(|days| days.contains(day))
            })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Persistence of event definitions. The store owns id assignment.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(&self, draft: EventDraft) -> ServiceResult<EventDefinition>;

    async fn get(&self, id: i32) -> ServiceResult<EventDefinition>;

    /// Definitions matching `filter`, ordered by start date then id.
    async fn list(&self, filter: &EventFilter) -> ServiceResult<Vec<EventDefinition>>;

    /// Replaces every user-editable field.
    async fn update(&self, id: i32, draft: EventDraft) -> ServiceResult<EventDefinition>;

    /// Marks the definition inactive.
    async fn soft_delete(&self, id: i32) -> ServiceResult<EventDefinition>;

    /// Marks the definition active again.
    async fn restore(&self, id: i32) -> ServiceResult<EventDefinition>;

    /// Removes the definition permanently.
    async fn hard_delete(&self, id: i32) -> ServiceResult<()>;
}

pub(crate) fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("event {id}"))
}
