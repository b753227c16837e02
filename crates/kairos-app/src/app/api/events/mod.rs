//! `/api/events` handlers: listing, creation, retrieval, update,
//! soft/hard deletion and restore of event definitions.

use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};

use kairos_service::event::{EventDraft, EventFilter, EventPayload};

use super::EVENTS_ROUTE_COMPONENT;
use super::response::{send_error, send_response};
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Reads the `{id}` path parameter as a positive integer.
///
/// ## Errors
/// Returns `AppError::BadRequest` if the parameter is missing or not a positive integer.
fn event_id(req: &Request) -> AppResult<i32> {
    req.param::<String>("id")
        .and_then(|raw| raw.parse::<i32>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("invalid event id".to_string()))
}

fn query_flag(req: &Request, name: &str) -> bool {
    req.query::<String>(name).as_deref() == Some("true")
}

/// ## Summary
/// Parses the JSON body and validates it into a draft.
///
/// ## Errors
/// Returns `AppError::BadRequest` for a malformed body, or a validation error
/// for missing or invalid fields.
async fn read_draft(req: &mut Request) -> AppResult<EventDraft> {
    let payload: EventPayload = req.parse_json().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse event body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;
    Ok(EventDraft::try_from(payload)?)
}

/// ## Summary
/// GET /api/events?frequency=&day=&stopped= - lists definitions.
///
/// `stopped=true` lists soft-deleted definitions, anything else the active ones.
///
/// ## Errors
/// Returns HTTP 400 for an unknown frequency or weekday code.
/// Returns HTTP 500 if the store cannot be read.
#[handler]
async fn list_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let filter = EventFilter::from_query(
            req.query::<String>("frequency").as_deref(),
            req.query::<String>("day").as_deref(),
            req.query::<String>("stopped").as_deref(),
        )?;
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(store.list(&filter).await?)
    }
    .await;

    match result {
        Ok(events) => {
            tracing::debug!(count = events.len(), "Events listed");
            send_response(res, StatusCode::OK, "Events fetched successfully", Some(events));
        }
        Err(e) => send_error(res, &e, "Failed to fetch events"),
    }
}

/// ## Summary
/// POST /api/events - creates a definition.
///
/// ## Errors
/// Returns HTTP 400 if `title`, `startDate` or `endDate` are missing or invalid.
/// Returns HTTP 500 if the store rejects the write.
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let draft = read_draft(req).await?;
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(store.create(draft).await?)
    }
    .await;

    match result {
        Ok(event) => {
            tracing::info!(event_id = event.id, title = %event.title, "Event created");
            send_response(res, StatusCode::CREATED, "Event created", Some(event));
        }
        Err(e) => send_error(res, &e, "Failed to create event"),
    }
}

/// ## Summary
/// GET /api/events/{id} - fetches one definition, active or not.
///
/// ## Errors
/// Returns HTTP 404 if the id is unknown.
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let id = event_id(req)?;
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(store.get(id).await?)
    }
    .await;

    match result {
        Ok(event) => send_response(res, StatusCode::OK, "Event fetched", Some(event)),
        Err(e) => send_error(res, &e, "Failed to fetch event"),
    }
}

/// ## Summary
/// PUT /api/events/{id} - full update, or `?restore=true` to reactivate a
/// soft-deleted definition without touching any other field.
///
/// ## Errors
/// Returns HTTP 400 for an invalid body, HTTP 404 for an unknown id.
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let restore = query_flag(req, "restore");

    let result = async {
        let id = event_id(req)?;
        let store = get_store_from_depot(depot)?;
        if restore {
            return Ok::<_, AppError>(store.restore(id).await?);
        }
        let draft = read_draft(req).await?;
        Ok(store.update(id, draft).await?)
    }
    .await;

    match result {
        Ok(event) if restore => {
            tracing::info!(event_id = event.id, "Event restored");
            send_response(res, StatusCode::OK, "Event restored", Some(event));
        }
        Ok(event) => {
            tracing::info!(event_id = event.id, "Event updated");
            send_response(res, StatusCode::OK, "Event updated", Some(event));
        }
        Err(e) => send_error(res, &e, "Failed to update event"),
    }
}

/// ## Summary
/// DELETE /api/events/{id} - soft delete, or `?hard=true` to remove permanently.
///
/// ## Errors
/// Returns HTTP 404 for an unknown id.
#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let hard = query_flag(req, "hard");

    let result = async {
        let id = event_id(req)?;
        let store = get_store_from_depot(depot)?;
        if hard {
            store.hard_delete(id).await?;
            tracing::info!(event_id = id, "Event permanently deleted");
            return Ok::<_, AppError>(None);
        }
        let event = store.soft_delete(id).await?;
        tracing::info!(event_id = id, "Event stopped");
        Ok(Some(event))
    }
    .await;

    match result {
        Ok(None) => send_response::<()>(res, StatusCode::OK, "Event permanently deleted", None),
        Ok(Some(event)) => send_response(res, StatusCode::OK, "Event stopped", Some(event)),
        Err(e) => send_error(res, &e, "Failed to delete event"),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(list_events)
        .post(create_event)
        .push(
            Router::with_path("{id}")
                .get(get_event)
                .put(update_event)
                .delete(delete_event),
        )
}
