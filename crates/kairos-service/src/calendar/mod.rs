//! Calendar view: recurrence expansion over stored event definitions.

mod expand;
mod horizon;

pub use expand::{Expander, expand};
pub use horizon::{ExpansionWindow, HorizonPolicy};

use kairos_core::types::Occurrence;

use crate::error::ServiceResult;
use crate::event::{EventFilter, EventStore};

/// ## Summary
/// Loads the definitions matching `filter` and expands them for display.
///
/// Occurrences that do not overlap `window` are left out, one-off events
/// included.
///
/// ## Errors
/// Returns an error if the store cannot be read. Expansion itself never fails.
#[tracing::instrument(skip(store, expander))]
pub async fn occurrences(
    store: &dyn EventStore,
    filter: &EventFilter,
    expander: &Expander,
    window: &ExpansionWindow,
) -> ServiceResult<Vec<Occurrence>> {
    let definitions = store.list(filter).await?;
    let mut occurrences = expander.expand(&definitions, window);
    occurrences.retain(|occurrence| window.overlaps(occurrence.start, occurrence.end));
    Ok(occurrences)
}
