//! # Kanamemo Core
//!
//! Learning-progress engine for kana study. Tracks one local user's history
//! over the fixed 46-symbol gojuon alphabet:
//!
//! - **SM-2 scheduling**: per-item review intervals and ease factors
//! - **Item lifecycle**: new -> learning -> reviewing -> mastered, with
//!   suspend/resume and per-item reset
//! - **Recommendations**: greedy priority ranking of what to practice next
//! - **Statistics**: sessions, day streaks, study time, milestones
//! - **Crash-safe persistence**: two-slot storage with compression,
//!   backup-before-write, write verification, rollback, and corruption
//!   recovery
//!
//! The visual UI is an external collaborator: it drives the engine through
//! [`ProgressStore`] and renders the immutable snapshots it hands back.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kanamemo_core::{
//!     FileSlotStore, ProgressAction, ProgressRepository, ProgressStore,
//! };
//!
//! // Open the store (default platform-specific slot location)
//! let slots = Arc::new(FileSlotStore::new(None)?);
//! let (mut store, _source) = ProgressStore::open(ProgressRepository::new(slots)).await?;
//!
//! // The user answered "ka" correctly
//! store.apply("ka", ProgressAction::Interact { quality: 4 }).await?;
//!
//! // What should they practice next?
//! let next = store.recommendations(&["か行", "さ行"]);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod gojuon;
pub mod progress;
pub mod recommend;
pub mod srs;
pub mod storage;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Progress model
pub use progress::{
    AchievementStats, DisplayMode, KanaItem, KanaStatus, LearningProgress, LearningStats,
    Metadata, Milestone, MilestoneKind, Preferences, PreferencesUpdate, ProgressAction,
    ProgressIndicator, SessionStats, StreakInfo, TimeStats, UserProfile, SCHEMA_VERSION,
};

// SM-2 scheduler
pub use srs::{
    calculate_next_review, ScheduleUpdate, DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR, RECALL_THRESHOLD,
};

// Recommendation engine
pub use recommend::{priority, recommendations, MAX_RECOMMENDATIONS};

// Gojuon tables
pub use gojuon::KanaGlyph;

// Storage layer
pub use storage::{
    FileSlotStore, LoadOutcome, MemorySlotStore, ProgressError, ProgressRepository, Result,
    SlotStore, BACKUP_SLOT, PRIMARY_SLOT,
};

// Progress store
pub use store::{LoadSource, ProgressStore};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        FileSlotStore, KanaItem, KanaStatus, LearningProgress, LoadOutcome, LoadSource,
        MemorySlotStore, ProgressAction, ProgressError, ProgressRepository, ProgressStore, Result,
        SlotStore,
    };
}
