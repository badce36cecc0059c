//! Slot Store Capability
//!
//! The repository depends only on this small key-value abstraction with
//! string values, so durable storage stays injectable: the file-backed
//! implementation is the production default, the in-memory one backs tests
//! and can simulate write failures and corruption.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use directories::ProjectDirs;

use super::{ProgressError, Result};

// ============================================================================
// CAPABILITY
// ============================================================================

/// Key-value slot storage with string values.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Read a slot; `None` when the slot was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a slot, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Delete a slot; deleting an absent slot is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// FILE-BACKED STORE
// ============================================================================

/// One file per slot under a local data directory.
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Open a slot store rooted at `dir`, or at the platform data directory
    /// when `None`.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("com", "kanamemo", "core").ok_or_else(|| {
                    ProgressError::Init("could not determine project directories".to_string())
                })?;
                proj_dirs.data_dir().to_path_buf()
            }
        };

        std::fs::create_dir_all(&dir)?;
        // Restrict directory permissions to owner-only on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            let _ = std::fs::set_permissions(&dir, perms);
        }

        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.slot"))
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.slot_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::write(self.slot_path(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.slot_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================================================
// IN-MEMORY STORE (test fake)
// ============================================================================

/// Value written in place of the real payload when a slot is corrupting.
/// Not valid base64, so any decode attempt fails.
const CORRUPT_SENTINEL: &str = "!corrupted-slot-payload!";

/// In-memory slot store for tests.
///
/// Writes to keys registered with [`fail_writes_to`](Self::fail_writes_to)
/// error out; writes to keys registered with
/// [`corrupt_writes_to`](Self::corrupt_writes_to) silently store garbage,
/// which trips the repository's read-back verification.
#[derive(Default)]
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
    failing: RwLock<HashSet<String>>,
    corrupting: RwLock<HashSet<String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `key` fail.
    pub fn fail_writes_to(&self, key: &str) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
    }

    /// Make every subsequent write to `key` store garbage instead.
    pub fn corrupt_writes_to(&self, key: &str) {
        self.corrupting
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
    }

    /// Overwrite a slot directly, bypassing the fault switches. Lets tests
    /// plant corrupt payloads as if a previous process had crashed mid-write.
    pub fn plant(&self, key: &str, value: &str) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    /// Clear all registered fault switches.
    pub fn clear_faults(&self) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.corrupting
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self
            .failing
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
        {
            return Err(ProgressError::Io(format!(
                "simulated write failure for slot '{key}'"
            )));
        }

        let stored = if self
            .corrupting
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
        {
            CORRUPT_SENTINEL.to_string()
        } else {
            value.to_string()
        };

        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), stored);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
