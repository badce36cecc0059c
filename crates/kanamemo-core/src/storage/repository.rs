//! Progress Repository
//!
//! Durable persistence over two slots: the primary payload and a backup of
//! the previous successfully written payload. Saves copy primary -> backup
//! before overwriting, verify the write by reading it back, and roll back
//! from the backup when verification fails. Loads fall back to the backup
//! on corruption and report the recovery distinctly from plain absence.
//!
//! Writes are never retried automatically; the caller decides whether to
//! try again.

use std::sync::Arc;

use serde_json::Value;

use crate::progress::LearningProgress;

use super::{codec, ProgressError, Result, SlotStore};

/// Slot key of the current-version aggregate payload.
pub const PRIMARY_SLOT: &str = "kana-learning-progress-v2";

/// Slot key of the previous successfully written payload.
pub const BACKUP_SLOT: &str = "kana-learning-backup";

/// Mandatory identity fields checked before an import is accepted.
const REQUIRED_IMPORT_FIELDS: &[&str] = &["version", "userId", "kanaProgress"];

// ============================================================================
// LOAD OUTCOME
// ============================================================================

/// Result of a [`ProgressRepository::load`].
///
/// Recovery from a corrupt primary slot is reported distinctly from plain
/// absence so callers can warn the user instead of silently starting over.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Primary slot decoded cleanly.
    Loaded(LearningProgress),
    /// Primary slot was corrupt; the aggregate was restored from the backup
    /// slot and the primary slot was rewritten to match.
    Recovered(LearningProgress),
    /// Nothing stored (or nothing decodable). Not an error: the caller
    /// creates a default aggregate.
    Absent,
}

impl LoadOutcome {
    /// The loaded aggregate, if any.
    pub fn into_progress(self) -> Option<LearningProgress> {
        match self {
            LoadOutcome::Loaded(progress) | LoadOutcome::Recovered(progress) => Some(progress),
            LoadOutcome::Absent => None,
        }
    }
}

// ============================================================================
// REPOSITORY
// ============================================================================

/// Durable storage for the progress aggregate.
pub struct ProgressRepository {
    slots: Arc<dyn SlotStore>,
}

impl ProgressRepository {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    /// Durably save the aggregate.
    ///
    /// The current primary payload is copied into the backup slot first, so
    /// previously durable data survives a partial failure. The write is
    /// verified by reading the slot back; on mismatch the primary slot is
    /// restored from the backup and [`ProgressError::WriteVerification`] is
    /// returned.
    pub async fn save(&self, progress: &LearningProgress) -> Result<()> {
        let previous = self.slots.get(PRIMARY_SLOT).await?;
        if let Some(ref current) = previous {
            self.slots.set(BACKUP_SLOT, current).await?;
        }

        let encoded = codec::encode(progress)?;

        if let Err(err) = self.slots.set(PRIMARY_SLOT, &encoded).await {
            self.rollback().await;
            return Err(err);
        }

        let stored = self.slots.get(PRIMARY_SLOT).await.ok().flatten();
        if stored.as_deref() != Some(encoded.as_str()) {
            tracing::warn!(slot = PRIMARY_SLOT, "write did not verify, rolling back");
            self.rollback().await;
            return Err(ProgressError::WriteVerification(PRIMARY_SLOT.to_string()));
        }

        tracing::debug!(slot = PRIMARY_SLOT, bytes = encoded.len(), "progress saved");
        Ok(())
    }

    /// Load the stored aggregate, falling back to the backup slot when the
    /// primary payload is corrupt.
    ///
    /// Plain absence is [`LoadOutcome::Absent`], never an error. Corruption
    /// that the backup slot cannot repair is a [`ProgressError::Decode`]:
    /// the progress store degrades to a fresh aggregate but keeps the error
    /// observable instead of silently starting over.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let Some(raw) = self.slots.get(PRIMARY_SLOT).await? else {
            return Ok(LoadOutcome::Absent);
        };

        match codec::decode(&raw) {
            Ok(progress) => Ok(LoadOutcome::Loaded(progress)),
            Err(err) => {
                tracing::warn!(error = %err, "primary slot corrupt, trying backup");
                let Some(backup_raw) = self.slots.get(BACKUP_SLOT).await? else {
                    return Err(err);
                };
                match codec::decode(&backup_raw) {
                    Ok(progress) => {
                        // Heal the primary slot so the next load is clean.
                        if let Err(err) = self.slots.set(PRIMARY_SLOT, &backup_raw).await {
                            tracing::warn!(error = %err, "failed to restore primary slot");
                        }
                        Ok(LoadOutcome::Recovered(progress))
                    }
                    Err(backup_err) => {
                        tracing::warn!(error = %backup_err, "backup slot corrupt too");
                        Err(backup_err)
                    }
                }
            }
        }
    }

    /// Serialize the stored aggregate to pretty-printed JSON.
    ///
    /// Uncompressed on purpose: the export format is for human inspection
    /// and portability, not for the slot store.
    pub async fn export(&self) -> Result<String> {
        match self.load().await? {
            LoadOutcome::Loaded(progress) | LoadOutcome::Recovered(progress) => {
                Ok(serde_json::to_string_pretty(&progress)?)
            }
            LoadOutcome::Absent => Err(ProgressError::NothingStored),
        }
    }

    /// Parse and store an exported aggregate.
    ///
    /// The payload is validated before any mutation: the mandatory identity
    /// fields must be present and the whole document must deserialize.
    /// Returns `false` without touching storage when validation or the
    /// subsequent save fails.
    pub async fn import(&self, data: &str) -> bool {
        let progress = match Self::validate_import(data) {
            Ok(progress) => progress,
            Err(err) => {
                tracing::warn!(error = %err, "import rejected");
                return false;
            }
        };

        match self.save(&progress).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "import failed to save");
                false
            }
        }
    }

    fn validate_import(data: &str) -> Result<LearningProgress> {
        let value: Value = serde_json::from_str(data)
            .map_err(|err| ProgressError::Validation(format!("not valid JSON: {err}")))?;

        for field in REQUIRED_IMPORT_FIELDS {
            if value.get(field).is_none() {
                return Err(ProgressError::Validation(format!(
                    "missing mandatory field '{field}'"
                )));
            }
        }

        serde_json::from_value(value)
            .map_err(|err| ProgressError::Validation(format!("malformed aggregate: {err}")))
    }

    /// Schema migration seam.
    ///
    /// Currently an identity pass-through: no migration steps are
    /// registered, so the payload is deserialized as the current schema.
    /// Known gap, not a forward-compatibility guarantee.
    pub fn migrate(&self, old_version: &str, raw: Value) -> Result<LearningProgress> {
        tracing::debug!(%old_version, "no migration steps registered, passing payload through");
        Ok(serde_json::from_value(raw)?)
    }

    /// Restore the primary slot from the backup slot (or clear it when no
    /// backup exists). Best-effort: rollback failures are logged, the
    /// original error still propagates to the caller.
    async fn rollback(&self) {
        match self.slots.get(BACKUP_SLOT).await {
            Ok(Some(backup)) => {
                if let Err(err) = self.slots.set(PRIMARY_SLOT, &backup).await {
                    tracing::warn!(error = %err, "rollback write failed");
                }
            }
            Ok(None) => {
                if let Err(err) = self.slots.remove(PRIMARY_SLOT).await {
                    tracing::warn!(error = %err, "rollback cleanup failed");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "rollback could not read backup slot");
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
