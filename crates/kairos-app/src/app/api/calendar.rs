//! `/api/calendar`: active definitions expanded into display occurrences.

use chrono::{Local, NaiveDate};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};

use kairos_core::timestamp::parse_date;
use kairos_service::calendar::{self, Expander, ExpansionWindow, HorizonPolicy};
use kairos_service::event::EventFilter;

use super::CALENDAR_ROUTE_COMPONENT;
use super::response::{send_error, send_response};
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

fn query_date(req: &Request, name: &str) -> AppResult<Option<NaiveDate>> {
    req.query::<String>(name)
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date(&raw))
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("{name}: {e}")))
}

/// ## Summary
/// GET /api/calendar?from=&to=&frequency=&day= - expands active definitions.
///
/// `to` defaults to the configured horizon; without `from` occurrences start
/// at each definition's own start. One-off events outside the window are
/// omitted, and a definition over the occurrence cap keeps its latest starts.
///
/// ## Errors
/// Returns HTTP 400 for unparseable dates, `to` before `from`, or unknown filter values.
/// Returns HTTP 500 if the store cannot be read.
#[handler]
async fn calendar_view(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let settings = get_config_from_depot(depot)?;
        let filter = EventFilter::from_query(
            req.query::<String>("frequency").as_deref(),
            req.query::<String>("day").as_deref(),
            None,
        )?;

        let horizon = HorizonPolicy::from(&settings.calendar).default_end(Local::now().date_naive());
        let from = query_date(req, "from")?;
        let to = query_date(req, "to")?.unwrap_or(horizon);
        let window = match from {
            Some(from) if to < from => {
                return Err(AppError::BadRequest("to must not be before from".to_string()));
            }
            Some(from) => ExpansionWindow::between(from, to),
            None => ExpansionWindow::until(to),
        };

        let expander =
            Expander::new(horizon).with_max_occurrences(settings.calendar.max_occurrences);
        let store = get_store_from_depot(depot)?;
        Ok::<_, AppError>(
            calendar::occurrences(store.as_ref(), &filter, &expander, &window).await?,
        )
    }
    .await;

    match result {
        Ok(occurrences) => {
            tracing::debug!(count = occurrences.len(), "Calendar expanded");
            send_response(
                res,
                StatusCode::OK,
                "Occurrences fetched successfully",
                Some(occurrences),
            );
        }
        Err(e) => send_error(res, &e, "Failed to expand calendar"),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDAR_ROUTE_COMPONENT).get(calendar_view)
}
