//! Due-item queue and grading on top of the SM-2 step.
//!
//! Both functions work on a plain [`Progress`] mapping and never touch disk;
//! persisting after a grade is the caller's job (see `ReviewSession`).

use super::catalog::Catalog;
use super::sm2::calculate_next_review;
use super::{ItemId, Progress, ReviewState};
use crate::config::SrsConfig;
use crate::error::Result;
use chrono::{DateTime, Utc};
use log::debug;
use std::iter;

/// Items due at `now`: never-reviewed items first in catalog order, then
/// reviewed items with `due_date <= now`, most overdue first.
///
/// The overdue part is only sorted once the unseen items have been consumed.
/// Progress entries for ids missing from the catalog are ignored.
pub fn due_items<'a>(
    catalog: &'a Catalog,
    progress: &'a Progress,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a ItemId> + 'a {
    let unseen = catalog
        .items
        .iter()
        .filter(move |item| !progress.contains_key(&item.id))
        .map(|item| &item.id);

    let overdue = iter::once(()).flat_map(move |()| overdue_items(catalog, progress, now));

    unseen.chain(overdue)
}

fn overdue_items<'a>(
    catalog: &'a Catalog,
    progress: &'a Progress,
    now: DateTime<Utc>,
) -> Vec<&'a ItemId> {
    let mut due: Vec<(DateTime<Utc>, &ItemId)> = catalog
        .items
        .iter()
        .filter_map(|item| {
            progress
                .get(&item.id)
                .filter(|state| state.is_due(now))
                .map(|state| (state.due_date, &item.id))
        })
        .collect();

    // Stable sort keeps catalog order for equal due dates.
    due.sort_by_key(|(due_date, _)| *due_date);
    due.into_iter().map(|(_, id)| id).collect()
}

/// Applies one rating to `item_id` and stores the result in `progress`.
///
/// Unknown ids start from a fresh state. An invalid rating leaves `progress`
/// untouched.
pub fn grade(
    progress: &mut Progress,
    item_id: &str,
    quality: u8,
    now: DateTime<Utc>,
    config: &SrsConfig,
) -> Result<ReviewState> {
    let next = match progress.get(item_id) {
        Some(state) => calculate_next_review(state, quality, now, config)?,
        None => calculate_next_review(&ReviewState::new(now), quality, now, config)?,
    };

    debug!(
        "Graded {} with {}: interval {} days, easiness {:.2}, repetitions {}",
        item_id, quality, next.interval, next.easiness, next.repetitions
    );

    progress.insert(item_id.to_string(), next.clone());
    Ok(next)
}
