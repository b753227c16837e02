//! Expansion of event definitions into concrete occurrences.

use std::collections::VecDeque;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

use kairos_core::config::DEFAULT_MAX_OCCURRENCES;
use kairos_core::types::{DayCode, EventDefinition, Frequency, Occurrence};

use super::horizon::ExpansionWindow;

/// ## Summary
/// Expands definitions up to `horizon_end`, which also serves as the bound
/// for open-ended recurrences.
#[must_use]
pub fn expand(definitions: &[EventDefinition], horizon_end: NaiveDate) -> Vec<Occurrence> {
    Expander::new(horizon_end).expand(definitions, &ExpansionWindow::until(horizon_end))
}

/// Stateless occurrence generator.
#[derive(Debug, Clone, Copy)]
pub struct Expander {
    default_horizon: NaiveDate,
    max_occurrences: usize,
}

impl Expander {
    /// `default_horizon` replaces a missing `recurringEndDate`.
    #[must_use]
    pub const fn new(default_horizon: NaiveDate) -> Self {
        Self {
            default_horizon,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }

    #[must_use]
    pub const fn with_max_occurrences(mut self, max_occurrences: usize) -> Self {
        self.max_occurrences = max_occurrences;
        self
    }

    /// ## Summary
    /// Expands every definition and flattens the results in input order.
    ///
    /// Occurrences of a single definition are in non-decreasing start order.
    /// Malformed definitions contribute nothing.
    #[tracing::instrument(skip(self, definitions), fields(definitions = definitions.len()))]
    #[must_use]
    pub fn expand(
        &self,
        definitions: &[EventDefinition],
        window: &ExpansionWindow,
    ) -> Vec<Occurrence> {
        let occurrences: Vec<Occurrence> = definitions
            .iter()
            .flat_map(|definition| self.expand_one(definition, window))
            .collect();

        tracing::debug!(occurrences = occurrences.len(), "Expanded definitions");
        occurrences
    }

    /// ## Summary
    /// Expands a single definition.
    ///
    /// A non-recurring definition yields exactly its own occurrence.
    #[must_use]
    pub fn expand_one(
        &self,
        definition: &EventDefinition,
        window: &ExpansionWindow,
    ) -> Vec<Occurrence> {
        if !definition.is_recurring {
            return vec![Occurrence::new(
                definition,
                definition.start_date,
                definition.end_date,
            )];
        }

        let Some(frequency) = definition.frequency else {
            tracing::debug!(event_id = definition.id, "Recurring event without frequency");
            return Vec::new();
        };

        let effective_end = definition
            .recurring_end_date
            .unwrap_or(self.default_horizon)
            .min(window.end);

        let starts: Vec<NaiveDateTime> = match frequency {
            Frequency::Monthly => self.collect_starts(
                definition.id,
                monthly_cursors(definition.start_date)
                    .take_while(|cursor| cursor.date() <= effective_end)
                    .filter(|cursor| window.start.is_none_or(|start| cursor.date() >= start)),
            ),
            Frequency::Daily => self.collect_starts(
                definition.id,
                daily_cursors(first_daily_cursor(definition, window))
                    .take_while(|cursor| cursor.date() <= effective_end),
            ),
            Frequency::Weekly => {
                let Some(days) = definition.days_of_week else {
                    tracing::debug!(event_id = definition.id, "Weekly event without daysOfWeek");
                    return Vec::new();
                };
                if days.is_empty() {
                    return Vec::new();
                }
                self.collect_starts(
                    definition.id,
                    daily_cursors(first_daily_cursor(definition, window))
                        .take_while(|cursor| cursor.date() <= effective_end)
                        .filter(|cursor| days.contains(DayCode::from(cursor.weekday()))),
                )
            }
        };

        let duration = definition.duration();
        starts
            .into_iter()
            .map(|start| Occurrence::new(definition, start, start + duration))
            .collect()
    }

    /// ## Summary
    /// Collects the last `max_occurrences` starts before the effective end.
    ///
    /// Cursor sequences are already bounded by the effective end; when the
    /// cap is exceeded the earliest starts are dropped first.
    fn collect_starts(
        &self,
        event_id: i32,
        cursors: impl Iterator<Item = NaiveDateTime>,
    ) -> Vec<NaiveDateTime> {
        let mut starts = VecDeque::with_capacity(self.max_occurrences.min(1024));
        let mut dropped = 0usize;

        for cursor in cursors {
            starts.push_back(cursor);
            if starts.len() > self.max_occurrences {
                starts.pop_front();
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::warn!(
                event_id,
                max_occurrences = self.max_occurrences,
                dropped,
                "Occurrence cap reached, dropping earliest occurrences"
            );
        }

        starts.into()
    }
}

/// Monthly cursors are computed from the original start, so a day-of-month
/// that does not exist in a target month is clamped to that month's last day
/// without drifting later months.
fn monthly_cursors(start: NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> {
    (0u32..).map_while(move |months| start.checked_add_months(Months::new(months)))
}

fn daily_cursors(first: NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> {
    std::iter::successors(Some(first), |cursor| cursor.checked_add_days(Days::new(1)))
}

/// Later of the definition start and the window start at the same time of day.
fn first_daily_cursor(definition: &EventDefinition, window: &ExpansionWindow) -> NaiveDateTime {
    window
        .start
        .map(|date| date.and_time(definition.start_date.time()))
        .filter(|cursor| *cursor > definition.start_date)
        .unwrap_or(definition.start_date)
}
