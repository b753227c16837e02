//! `PostgreSQL` event store over the shared connection pool.

use std::sync::Arc;

use chrono::Utc;
use salvo::async_trait;

use kairos_core::types::EventDefinition;
use kairos_db::db::DbProvider;
use kairos_db::db::query::event as event_query;
use kairos_db::model::event::{EventChangeset, NewEvent};

use super::input::EventDraft;
use super::store::{EventFilter, EventStore, not_found};
use crate::error::ServiceResult;

#[derive(Clone)]
pub struct PgEventStore {
    provider: Arc<dyn DbProvider + Send + Sync>,
}

impl PgEventStore {
    #[must_use]
    pub fn new(provider: Arc<dyn DbProvider + Send + Sync>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: EventDraft) -> ServiceResult<EventDefinition> {
        let mut conn = self.provider.get_connection().await?;
        let new_event = NewEvent {
            title: &draft.title,
            description: draft.description.as_deref(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_recurring: draft.is_recurring,
            frequency: draft.frequency.map(Into::into),
            days_of_week: draft.days_of_week.map(|days| days.to_string()),
            recurring_end_date: draft.recurring_end_date,
            is_active: draft.is_active,
        };

        let row = event_query::insert(&mut conn, &new_event).await?;
        tracing::debug!(event_id = row.id, "Event created");
        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: i32) -> ServiceResult<EventDefinition> {
        let mut conn = self.provider.get_connection().await?;
        event_query::by_id(&mut conn, id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: &EventFilter) -> ServiceResult<Vec<EventDefinition>> {
        let mut conn = self.provider.get_connection().await?;
        let rows = event_query::list(
            &mut conn,
            filter.frequency.map(Into::into),
            filter.day,
            filter.active,
        )
        .await?;
        tracing::trace!(count = rows.len(), "Listed events");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update(&self, id: i32, draft: EventDraft) -> ServiceResult<EventDefinition> {
        let mut conn = self.provider.get_connection().await?;
        let changes = EventChangeset {
            title: &draft.title,
            description: draft.description.as_deref(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_recurring: draft.is_recurring,
            frequency: draft.frequency.map(Into::into),
            days_of_week: draft.days_of_week.map(|days| days.to_string()),
            recurring_end_date: draft.recurring_end_date,
            is_active: draft.is_active,
            updated_at: Utc::now(),
        };

        event_query::update(&mut conn, id, &changes)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    async fn soft_delete(&self, id: i32) -> ServiceResult<EventDefinition> {
        let mut conn = self.provider.get_connection().await?;
        event_query::set_active(&mut conn, id, false)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    async fn restore(&self, id: i32) -> ServiceResult<EventDefinition> {
        let mut conn = self.provider.get_connection().await?;
        event_query::set_active(&mut conn, id, true)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    #[tracing::instrument(skip(self))]
    async fn hard_delete(&self, id: i32) -> ServiceResult<()> {
        let mut conn = self.provider.get_connection().await?;
        match event_query::delete(&mut conn, id).await? {
            0 => Err(not_found(id)),
            _ => Ok(()),
        }
    }
}
