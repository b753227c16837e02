//! In-process event store for local runs and tests.

use std::collections::BTreeMap;

use chrono::Utc;
use salvo::async_trait;
use tokio::sync::RwLock;

use kairos_core::types::EventDefinition;

use super::input::EventDraft;
use super::store::{EventFilter, EventStore, not_found};
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i32,
    events: BTreeMap<i32, EventDefinition>,
}

/// Event store backed by a map behind a `RwLock`. Ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    state: RwLock<MemoryState>,
}

impl MemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn set_active(&self, id: i32, active: bool) -> ServiceResult<EventDefinition> {
        let mut state = self.state.write().await;
        let event = state.events.get_mut(&id).ok_or_else(|| not_found(id))?;
        event.is_active = active;
        event.updated_at = Utc::now();
        Ok(event.clone())
    }
}

fn apply_draft(event: &mut EventDefinition, draft: EventDraft) {
    event.title = draft.title;
    event.description = draft.description;
    event.start_date = draft.start_date;
    event.end_date = draft.end_date;
    event.is_recurring = draft.is_recurring;
    event.frequency = draft.frequency;
    event.days_of_week = draft.days_of_week;
    event.recurring_end_date = draft.recurring_end_date;
    event.is_active = draft.is_active;
}

#[async_trait]
impl EventStore for MemoryEventStore {
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: EventDraft) -> ServiceResult<EventDefinition> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or(ServiceError::InvariantViolation("event id space exhausted"))?;
        let now = Utc::now();

        let event = EventDefinition {
            id,
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_recurring: draft.is_recurring,
            frequency: draft.frequency,
            days_of_week: draft.days_of_week,
            recurring_end_date: draft.recurring_end_date,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        };

        state.last_id = id;
        state.events.insert(id, event.clone());
        tracing::debug!(event_id = id, "Event created");
        Ok(event)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: i32) -> ServiceResult<EventDefinition> {
        self.state
            .read()
            .await
            .events
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: &EventFilter) -> ServiceResult<Vec<EventDefinition>> {
        let state = self.state.read().await;
        let mut events: Vec<EventDefinition> = state
            .events
            .values()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();
        events.sort_by_key(|event| (event.start_date, event.id));
        Ok(events)
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update(&self, id: i32, draft: EventDraft) -> ServiceResult<EventDefinition> {
        let mut state = self.state.write().await;
        let event = state.events.get_mut(&id).ok_or_else(|| not_found(id))?;
        apply_draft(event, draft);
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn soft_delete(&self, id: i32) -> ServiceResult<EventDefinition> {
        self.set_active(id, false).await
    }

    #[tracing::instrument(skip(self))]
    async fn restore(&self, id: i32) -> ServiceResult<EventDefinition> {
        self.set_active(id, true).await
    }

    #[tracing::instrument(skip(self))]
    async fn hard_delete(&self, id: i32) -> ServiceResult<()> {
        self.state
            .write()
            .await
            .events
            .remove(&id)
            .map(|_removed| ())
            .ok_or_else(|| not_found(id))
    }
}
