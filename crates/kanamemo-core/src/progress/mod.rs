//! Progress Model
//!
//! Core domain types for the learning-progress engine:
//! - Per-kana items with the status lifecycle and SM-2 scheduling state
//! - The aggregate record (profile, item map, statistics, metadata)
//! - Statistics upkeep: sessions, streaks, milestones

pub mod aggregate;
pub mod item;
pub mod statistics;

pub use aggregate::{
    AchievementStats, DisplayMode, LearningProgress, LearningStats, Metadata, Milestone,
    MilestoneKind, Preferences, PreferencesUpdate, ProgressIndicator, SessionStats, StreakInfo,
    TimeStats, UserProfile, DEFAULT_DAILY_GOAL, SCHEMA_VERSION,
};
pub use item::{
    KanaItem, KanaStatus, ProgressAction, CONFIDENCE_GAIN, CONFIDENCE_PENALTY, DEFAULT_DIFFICULTY,
    MASTERY_CONFIDENCE, MASTERY_INTERVAL_DAYS, RESUME_CONFIDENCE,
};
pub use statistics::{
    award_milestones, record_review, record_session, streak_info, MASTERY_MILESTONE_STEP,
    PERFECT_WEEK_DAYS, REVIEW_MILESTONES, STREAK_MILESTONES, STREAK_WINDOW_HOURS,
};
