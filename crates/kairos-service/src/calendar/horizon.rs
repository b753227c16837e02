use chrono::{Datelike, NaiveDate, NaiveDateTime};

use kairos_core::config::{CalendarConfig, DEFAULT_HORIZON_YEARS};

/// Bound applied to open-ended recurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonPolicy {
    pub years_ahead: u16,
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        Self {
            years_ahead: DEFAULT_HORIZON_YEARS,
        }
    }
}

impl From<&CalendarConfig> for HorizonPolicy {
    fn from(config: &CalendarConfig) -> Self {
        Self {
            years_ahead: config.horizon_years,
        }
    }
}

impl HorizonPolicy {
    /// ## Summary
    /// Returns 31 December of `today`'s year plus `years_ahead`.
    #[must_use]
    pub fn default_end(self, today: NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(today.year() + i32::from(self.years_ahead), 12, 31)
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Display window handed to the expander.
///
/// `start` only moves the daily/weekly cursor forward and hides earlier
/// monthly occurrences; it never produces occurrences before a definition's
/// own start. `end` is inclusive on the date portion.
///
/// The expander returns a non-recurring definition whole whatever the window;
/// [`ExpansionWindow::overlaps`] is what the calendar view uses to drop those
/// falling outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWindow {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl ExpansionWindow {
    #[must_use]
    pub const fn until(end: NaiveDate) -> Self {
        Self { start: None, end }
    }

    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    /// ## Summary
    /// Whether the span `[start, end]` touches any day of the window.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start.date() <= self.end && self.start.is_none_or(|from| end.date() >= from)
    }
}
