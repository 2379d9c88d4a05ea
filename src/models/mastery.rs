//! Mastery classification for display and statistics.
use super::ReviewState;
use crate::config::SrsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    New,
    Learning,
    Young,
    Mature,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 4] = [
        MasteryLevel::New,
        MasteryLevel::Learning,
        MasteryLevel::Young,
        MasteryLevel::Mature,
    ];
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MasteryLevel::New => "new",
            MasteryLevel::Learning => "learning",
            MasteryLevel::Young => "young",
            MasteryLevel::Mature => "mature",
        };
        f.write_str(name)
    }
}

/// `None` means the item has never been reviewed.
pub fn mastery_level(state: Option<&ReviewState>, config: &SrsConfig) -> MasteryLevel {
    match state {
        None => MasteryLevel::New,
        Some(s) if s.repetitions < 2 => MasteryLevel::Learning,
        Some(s) if s.interval < config.young_threshold_days => MasteryLevel::Young,
        Some(_) => MasteryLevel::Mature,
    }
}
