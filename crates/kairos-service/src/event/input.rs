//! Request payloads and their validation into store drafts.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use kairos_core::timestamp::{parse_date, parse_timestamp};
use kairos_core::types::{DaySet, Frequency};

use crate::error::{ServiceError, ServiceResult};

const REQUIRED_FIELDS_MESSAGE: &str = "title, startDate, endDate are required";

/// Event body as received from clients. Every field is optional here;
/// validation happens in [`EventDraft::try_from`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_recurring: Option<bool>,
    pub frequency: Option<String>,
    pub days_of_week: Option<DaySet>,
    pub recurring_end_date: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated event fields ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<DaySet>,
    pub recurring_end_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl TryFrom<EventPayload> for EventDraft {
    type Error = ServiceError;

    fn try_from(payload: EventPayload) -> ServiceResult<Self> {
        let (Some(title), Some(start_raw), Some(end_raw)) = (
            non_blank(payload.title),
            non_blank(payload.start_date),
            non_blank(payload.end_date),
        ) else {
            return Err(ServiceError::ValidationError(
                REQUIRED_FIELDS_MESSAGE.to_string(),
            ));
        };

        let start_date = parse_timestamp(&start_raw).map_err(|e| field_error("startDate", &e))?;
        let end_date = parse_timestamp(&end_raw).map_err(|e| field_error("endDate", &e))?;
        if end_date <= start_date {
            return Err(ServiceError::ValidationError(
                "endDate must be after startDate".to_string(),
            ));
        }

        let is_recurring = payload.is_recurring.unwrap_or(false);
        let is_active = payload.is_active.unwrap_or(true);

        if !is_recurring {
            return Ok(Self {
                title,
                description: payload.description,
                start_date,
                end_date,
                is_recurring,
                frequency: None,
                days_of_week: None,
                recurring_end_date: None,
                is_active,
            });
        }

        let frequency = non_blank(payload.frequency)
            .map(|raw| raw.parse::<Frequency>())
            .transpose()
            .map_err(|e| field_error("frequency", &e))?;
        let recurring_end_date = non_blank(payload.recurring_end_date)
            .map(|raw| parse_date(&raw))
            .transpose()
            .map_err(|e| field_error("recurringEndDate", &e))?;

        Ok(Self {
            title,
            description: payload.description,
            start_date,
            end_date,
            is_recurring,
            frequency,
            days_of_week: payload.days_of_week,
            recurring_end_date,
            is_active,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn field_error(field: &str, err: &kairos_core::error::CoreError) -> ServiceError {
    ServiceError::ValidationError(format!("{field}: {err}"))
}
