//! Daily study streak and session counter.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyLog {
    pub streak: u32,
    pub last_session_date: Option<NaiveDate>,
    pub total_sessions: u32,
}

impl StudyLog {
    /// Records that the learner studied on `today`. Returns `true` when this
    /// is the first session of the day.
    pub fn record_session(&mut self, today: NaiveDate) -> bool {
        match self.last_session_date {
            Some(last) if last == today => return false,
            Some(last) if last.succ_opt() == Some(today) => self.streak += 1,
            None => self.streak += 1,
            // A gap, or a clock that went backwards.
            Some(_) => self.streak = 1,
        }
        self.last_session_date = Some(today);
        self.total_sessions += 1;
        true
    }

    /// Streak as of `today`: zero once a whole day has been skipped.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        match self.last_session_date {
            Some(last) if last == today || last.succ_opt() == Some(today) => self.streak,
            _ => 0,
        }
    }
}
