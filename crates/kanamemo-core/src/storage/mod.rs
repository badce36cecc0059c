//! Storage Module
//!
//! Durable persistence for the progress aggregate over two key-value slots:
//! - Injected slot-store capability with file-backed and in-memory
//!   implementations
//! - Slot payload codec (JSON -> LZ4 -> base64 string)
//! - Repository with backup-before-write, write verification, rollback, and
//!   corruption recovery

mod codec;
mod repository;
mod slots;

pub use codec::{decode, encode};
pub use repository::{LoadOutcome, ProgressRepository, BACKUP_SLOT, PRIMARY_SLOT};
pub use slots::{FileSlotStore, MemorySlotStore, SlotStore};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage and progress-engine error type.
///
/// `Clone` so the progress store can both surface a failure to the caller
/// and retain it in its observable error slot.
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProgressError {
    /// Slot I/O failure (filesystem or simulated).
    #[error("slot I/O error: {0}")]
    Io(String),
    /// Stored payload could not be decoded (corrupt or truncated).
    #[error("corrupt payload: {0}")]
    Decode(String),
    /// A written slot did not read back as expected.
    #[error("write verification failed for slot '{0}'")]
    WriteVerification(String),
    /// Import payload rejected before any mutation.
    #[error("invalid import payload: {0}")]
    Validation(String),
    /// Export requested but nothing is stored.
    #[error("no stored progress to export")]
    NothingStored,
    /// Aggregate could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Initialization error.
    #[error("initialization error: {0}")]
    Init(String),
}

impl From<std::io::Error> for ProgressError {
    fn from(err: std::io::Error) -> Self {
        ProgressError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(err: serde_json::Error) -> Self {
        ProgressError::Serialization(err.to_string())
    }
}

/// Storage result type.
pub type Result<T> = std::result::Result<T, ProgressError>;
