//! Review session management for spaced repetition practice.
//! Handles multi-round review of due items with SM-2 grading and persistence.

use super::catalog::{Catalog, VocabItem};
use super::scheduler::{due_items, grade};
use super::sm2::PASSING_QUALITY;
use super::{ItemId, Progress, ReviewState, StudyLog};
use crate::config::SrsConfig;
use crate::error::{Error, Result};
use crate::store::{ProgressStore, StudyLogStore};
use chrono::{DateTime, Utc};
use log::{debug, warn};

/// Owns the learner's progress for the duration of a session and is the only
/// writer of it. Items that lapse (grade < 3) are repeated in later rounds.
pub struct ReviewSession<'a> {
    catalog: &'a Catalog,
    config: SrsConfig,
    store: ProgressStore,
    log_store: StudyLogStore,
    progress: Progress,
    study_log: StudyLog,
    current_round: Vec<ItemId>,
    current_index: usize,
    lapsed: Vec<ItemId>,
    round_number: usize,
    graded_count: usize,
    unsaved: bool,
}

impl<'a> ReviewSession<'a> {
    /// Loads progress and queues up to `review_session_size` due items.
    /// A corrupt progress snapshot is backed up and replaced by an empty one.
    pub fn start(
        catalog: &'a Catalog,
        store: ProgressStore,
        log_store: StudyLogStore,
        config: SrsConfig,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let progress = store.load_or_recover()?;
        let study_log = log_store.load()?;

        let queue: Vec<ItemId> = due_items(catalog, &progress, now)
            .take(config.review_session_size)
            .cloned()
            .collect();

        debug!("Starting review session with {} items", queue.len());

        Ok(Self {
            catalog,
            config,
            store,
            log_store,
            progress,
            study_log,
            current_round: queue,
            current_index: 0,
            lapsed: Vec::new(),
            round_number: 1,
            graded_count: 0,
            unsaved: false,
        })
    }

    pub fn current_id(&self) -> Option<&ItemId> {
        self.current_round.get(self.current_index)
    }

    pub fn current(&self) -> Option<&VocabItem> {
        self.current_id().and_then(|id| self.catalog.get(id))
    }

    /// Grades the current item, moves on, and saves the whole snapshot.
    ///
    /// An invalid rating changes nothing. If the save fails the grade is kept
    /// in memory, `StoreWrite` is returned and [`retry_save`](Self::retry_save)
    /// can be called later.
    pub fn grade_current(&mut self, quality: u8, now: DateTime<Utc>) -> Result<ReviewState> {
        let id = self.current_id().cloned().ok_or(Error::SessionComplete)?;

        let state = grade(&mut self.progress, &id, quality, now, &self.config)?;

        if quality < PASSING_QUALITY {
            self.lapsed.push(id);
        }
        if self.graded_count == 0 {
            self.study_log.record_session(now.date_naive());
        }
        self.graded_count += 1;
        self.advance();

        self.unsaved = true;
        self.persist()?;
        Ok(state)
    }

    /// Persists the current in-memory state again after a failed save.
    pub fn retry_save(&mut self) -> Result<()> {
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        if let Err(e) = self.store.save(&self.progress) {
            warn!("Saving progress failed, keeping session state in memory: {}", e);
            return Err(e);
        }
        self.log_store.save(&self.study_log)?;
        self.unsaved = false;
        Ok(())
    }

    fn advance(&mut self) {
        self.current_index += 1;
        if self.current_index < self.current_round.len() {
            return;
        }

        // End of round: lapsed items become the next round.
        if !self.lapsed.is_empty() {
            self.current_round = std::mem::take(&mut self.lapsed);
            self.current_index = 0;
            self.round_number += 1;
            debug!(
                "Round {}: {} items to retry",
                self.round_number,
                self.current_round.len()
            );
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.current_round.len()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    pub fn remaining_in_round(&self) -> usize {
        self.current_round.len().saturating_sub(self.current_index)
    }

    pub fn graded_count(&self) -> usize {
        self.graded_count
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn study_log(&self) -> &StudyLog {
        &self.study_log
    }

    pub fn config(&self) -> &SrsConfig {
        &self.config
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} items", self.round_number, self.current_round.len())
        } else {
            format!(
                "Round {} (Retry): {} items to retry",
                self.round_number,
                self.current_round.len()
            )
        }
    }
}
