use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of a catalog item.
pub type ItemId = String;

/// Whole-session mapping of item id to review state. Ordered so snapshots
/// are written with a stable key order.
pub type Progress = BTreeMap<ItemId, ReviewState>;

pub const INITIAL_EASINESS: f64 = 2.5;

/// SM-2 scheduling state for one vocabulary item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub repetitions: u32,
    pub interval: u32,
    pub easiness: f64,
    pub due_date: DateTime<Utc>,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub history: Vec<u8>,
}

impl ReviewState {
    /// Implicit starting point for an item that has never been reviewed.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            repetitions: 0,
            interval: 0,
            easiness: INITIAL_EASINESS,
            due_date: now,
            last_reviewed: None,
            history: Vec::new(),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }

    /// Percentage of ratings in `history` that were successful (>= 3).
    /// With `history_limit` set this covers only the retained ratings.
    pub fn accuracy(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let correct = self.history.iter().filter(|&&q| q >= 3).count();
        Some(correct as f64 / self.history.len() as f64 * 100.0)
    }
}
