//! Progress Store
//!
//! The in-memory holder of the live aggregate. Every mutation builds a
//! complete new aggregate value and publishes it as a fresh immutable
//! snapshot (`Arc`) before awaiting the durable save - snapshots handed out
//! earlier are never mutated, and no partially updated aggregate is ever
//! observable.
//!
//! Saves are optimistic: the in-memory snapshot is replaced first, then the
//! repository save runs. A save failure is kept in the observable error
//! slot *and* returned to the caller; the in-memory copy is not rolled back
//! (only the durable layer rolls itself back). Overlapping saves are not
//! serialized - the last save to complete determines durable state, which
//! is acceptable for a single local user.

use std::sync::Arc;

use chrono::Utc;

use crate::progress::{
    statistics, KanaItem, KanaStatus, LearningProgress, LearningStats, Milestone,
    PreferencesUpdate, ProgressAction, StreakInfo,
};
use crate::recommend;
use crate::storage::{LoadOutcome, ProgressError, ProgressRepository, Result};

// ============================================================================
// LOAD SOURCE
// ============================================================================

/// Where the aggregate held by a freshly opened store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No stored data existed; a default aggregate was created and saved.
    Fresh,
    /// The primary slot decoded cleanly.
    Loaded,
    /// The aggregate was recovered from the backup slot after corruption.
    Recovered,
}

// ============================================================================
// PROGRESS STORE
// ============================================================================

/// Canonical in-memory holder of the learning-progress aggregate.
pub struct ProgressStore {
    repository: ProgressRepository,
    progress: Arc<LearningProgress>,
    last_error: Option<ProgressError>,
}

impl ProgressStore {
    /// Open the store: load the stored aggregate, or create and persist the
    /// first-run default when nothing is stored.
    ///
    /// Unrecoverable corruption does not prevent opening either: the store
    /// degrades to a fresh aggregate and keeps the decode error in the
    /// observable slot so the UI can warn the user. The same goes for a
    /// failure to persist the first-run default - the in-memory aggregate
    /// works and the next successful save will catch up. Slot I/O failures
    /// on load do propagate.
    pub async fn open(repository: ProgressRepository) -> Result<(Self, LoadSource)> {
        let now = Utc::now();

        let outcome = match repository.load().await {
            Ok(outcome) => outcome,
            Err(err @ ProgressError::Decode(_)) => {
                tracing::warn!(error = %err, "stored progress unrecoverable, starting fresh");
                let fresh = LearningProgress::first_run(now);
                if let Err(save_err) = repository.save(&fresh).await {
                    tracing::warn!(error = %save_err, "could not persist first-run aggregate");
                }
                return Ok((
                    Self {
                        repository,
                        progress: Arc::new(fresh),
                        last_error: Some(err),
                    },
                    LoadSource::Fresh,
                ));
            }
            Err(err) => return Err(err),
        };

        let (progress, source, first_error) = match outcome {
            LoadOutcome::Loaded(progress) => (progress, LoadSource::Loaded, None),
            LoadOutcome::Recovered(progress) => (progress, LoadSource::Recovered, None),
            LoadOutcome::Absent => {
                let fresh = LearningProgress::first_run(now);
                let error = repository.save(&fresh).await.err();
                if let Some(ref err) = error {
                    tracing::warn!(error = %err, "could not persist first-run aggregate");
                }
                (fresh, LoadSource::Fresh, error)
            }
        };

        Ok((
            Self {
                repository,
                progress: Arc::new(progress),
                last_error: first_error,
            },
            source,
        ))
    }

    /// The current immutable aggregate snapshot.
    pub fn snapshot(&self) -> Arc<LearningProgress> {
        Arc::clone(&self.progress)
    }

    /// Lifecycle status of one kana; `New` when it has no record.
    pub fn status_of(&self, key: &str) -> KanaStatus {
        self.progress
            .kana_progress
            .get(key)
            .map(|item| item.status)
            .unwrap_or(KanaStatus::New)
    }

    /// Current cumulative statistics.
    pub fn stats(&self) -> &LearningStats {
        &self.progress.statistics
    }

    /// Streak snapshot against the current wall clock.
    pub fn streak_info(&self) -> StreakInfo {
        statistics::streak_info(&self.progress.statistics, Utc::now())
    }

    /// Ranked practice recommendations for the given gojuon rows.
    pub fn recommendations(&self, rows: &[&str]) -> Vec<String> {
        recommend::recommendations(&self.progress, rows, Utc::now())
    }

    /// Milestones not yet shown by the celebration UI, with their indices.
    pub fn uncelebrated_milestones(&self) -> Vec<(usize, &Milestone)> {
        self.progress
            .statistics
            .achievements
            .milestones
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.celebrated)
            .collect()
    }

    /// The most recent repository failure, if any.
    pub fn last_error(&self) -> Option<&ProgressError> {
        self.last_error.as_ref()
    }

    /// Clear the observable error slot.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Apply one action to a kana, creating its item on first access.
    ///
    /// Interactions run the scheduler, update the achievement counters and
    /// may award milestones.
    pub async fn apply(&mut self, key: &str, action: ProgressAction) -> Result<()> {
        let now = Utc::now();

        let mut item = self
            .progress
            .kana_progress
            .get(key)
            .cloned()
            .unwrap_or_else(|| KanaItem::new(now));
        item.apply(&action, now);

        let mut next = LearningProgress::clone(&self.progress);
        next.kana_progress.insert(key.to_string(), item);
        next.metadata.last_sync = Some(now);
        next.profile.last_active_at = now;

        if matches!(action, ProgressAction::Interact { .. }) {
            statistics::record_review(&mut next, now);
        }

        self.publish_and_save(next).await
    }

    /// Merge a partial preferences update.
    pub async fn update_preferences(&mut self, update: PreferencesUpdate) -> Result<()> {
        let mut next = LearningProgress::clone(&self.progress);
        next.profile.preferences.merge(update);
        self.publish_and_save(next).await
    }

    /// Remove item entries entirely. `None` resets everything; a key with
    /// no entry is silently skipped. Top-level fields (profile, statistics,
    /// identity) are untouched.
    pub async fn reset(&mut self, keys: Option<&[&str]>) -> Result<()> {
        let mut next = LearningProgress::clone(&self.progress);
        match keys {
            Some(keys) => {
                for key in keys {
                    next.kana_progress.remove(*key);
                }
            }
            None => next.kana_progress.clear(),
        }
        self.publish_and_save(next).await
    }

    /// Record one completed study session: session count, streak, time
    /// counters, and `goal_met` marking the day as perfect.
    pub async fn record_session(&mut self, seconds: i64, goal_met: bool) -> Result<()> {
        let now = Utc::now();
        let mut next = LearningProgress::clone(&self.progress);
        statistics::record_session(&mut next.statistics, seconds, goal_met, now);
        next.profile.last_active_at = now;
        self.publish_and_save(next).await
    }

    /// Flip one milestone's `celebrated` flag false -> true. Returns whether
    /// anything changed; flipping an already celebrated milestone (or an
    /// out-of-range index) is a no-op that does not touch storage.
    pub async fn mark_milestone_celebrated(&mut self, index: usize) -> Result<bool> {
        let already = match self
            .progress
            .statistics
            .achievements
            .milestones
            .get(index)
        {
            Some(milestone) => milestone.celebrated,
            None => return Ok(false),
        };
        if already {
            return Ok(false);
        }

        let mut next = LearningProgress::clone(&self.progress);
        next.statistics.achievements.milestones[index].celebrated = true;
        self.publish_and_save(next).await?;
        Ok(true)
    }

    /// Export the durably stored aggregate as pretty JSON.
    pub async fn export(&self) -> Result<String> {
        self.repository.export().await
    }

    /// Import an exported aggregate; on success it replaces both the
    /// durable and the in-memory state. Returns `false` when the payload
    /// was rejected or could not be saved.
    pub async fn import(&mut self, data: &str) -> bool {
        if !self.repository.import(data).await {
            return false;
        }
        match self.repository.load().await {
            Ok(outcome) => {
                if let Some(progress) = outcome.into_progress() {
                    self.progress = Arc::new(progress);
                }
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not reload after import");
                self.last_error = Some(err);
                false
            }
        }
    }

    /// Publish the new snapshot, then try to save it.
    async fn publish_and_save(&mut self, next: LearningProgress) -> Result<()> {
        let next = Arc::new(next);
        self.progress = Arc::clone(&next);

        match self.repository.save(&next).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
