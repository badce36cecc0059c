//! Learning Progress Aggregate
//!
//! The complete persisted record for one local user/device: profile and
//! preferences, the per-kana item map, cumulative statistics with
//! milestones, and storage metadata. One aggregate exists per device; it is
//! created deterministically on first run and then lives indefinitely.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::KanaItem;

/// Schema version written into new aggregates and checked on load.
pub const SCHEMA_VERSION: &str = "2.0.0";

/// Default daily study goal (kana per day).
pub const DEFAULT_DAILY_GOAL: u32 = 10;

// ============================================================================
// PROFILE
// ============================================================================

/// How learned kana are presented by the consuming UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Card,
    List,
}

/// Progress indicator style used by the consuming UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProgressIndicator {
    Color,
    Badge,
    #[default]
    Both,
}

/// Study preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Daily goal in kana.
    pub daily_goal: u32,
    /// Whether reminder banners are enabled.
    pub reminder_enabled: bool,
    pub display_mode: DisplayMode,
    pub progress_indicator: ProgressIndicator,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            daily_goal: DEFAULT_DAILY_GOAL,
            reminder_enabled: false,
            display_mode: DisplayMode::Card,
            progress_indicator: ProgressIndicator::Both,
        }
    }
}

/// A partial preferences update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub daily_goal: Option<u32>,
    pub reminder_enabled: Option<bool>,
    pub display_mode: Option<DisplayMode>,
    pub progress_indicator: Option<ProgressIndicator>,
}

impl Preferences {
    /// Merge a partial update into the preferences.
    pub fn merge(&mut self, update: PreferencesUpdate) {
        if let Some(goal) = update.daily_goal {
            self.daily_goal = goal;
        }
        if let Some(enabled) = update.reminder_enabled {
            self.reminder_enabled = enabled;
        }
        if let Some(mode) = update.display_mode {
            self.display_mode = mode;
        }
        if let Some(indicator) = update.progress_indicator {
            self.progress_indicator = indicator;
        }
    }
}

/// User profile for the single local user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Session counters and the day streak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total: u32,
    /// Consecutive study days including today.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_session_date: Option<DateTime<Utc>>,
}

/// Study time counters, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeStats {
    pub total: i64,
    pub today: i64,
    pub this_week: i64,
    /// Average seconds per recorded session.
    pub average: i64,
}

/// Kind of a one-time achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    KanaMastered,
    Streak,
    TotalReviews,
    PerfectWeek,
}

/// A one-time achievement crossed by cumulative statistics.
///
/// Milestones are append-only; `celebrated` flips false -> true exactly once
/// when the celebration UI has shown it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    /// The threshold that was crossed.
    pub value: u32,
    pub achieved_at: DateTime<Utc>,
    pub celebrated: bool,
}

/// Achievement counters plus the milestone log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    pub total_kana_mastered: u32,
    pub total_reviews: u32,
    /// Days on which the daily goal was met.
    pub perfect_days: u32,
    pub milestones: Vec<Milestone>,
}

/// All cumulative learning statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub sessions: SessionStats,
    pub time_spent: TimeStats,
    pub achievements: AchievementStats,
}

/// Snapshot of the day streak for reminder surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub current: u32,
    pub longest: u32,
    /// Hours left before the streak lapses.
    pub hours_until_break: f64,
    /// Whether more than a full day has already passed.
    pub will_break_today: bool,
}

// ============================================================================
// METADATA
// ============================================================================

/// Storage metadata carried alongside the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub app_version: String,
    /// Last time the aggregate was written (local saves only; no sync yet).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

// ============================================================================
// AGGREGATE ROOT
// ============================================================================

/// The complete learning-progress record for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    /// Schema version, consulted for migration.
    pub version: String,
    /// Opaque locally generated user identifier.
    pub user_id: String,
    pub profile: UserProfile,
    /// Per-kana learning items, keyed by romaji key. An item absent from
    /// the map has no recorded history.
    pub kana_progress: HashMap<String, KanaItem>,
    pub statistics: LearningStats,
    pub metadata: Metadata,
}

impl LearningProgress {
    /// Deterministic first-run aggregate: empty item map, default
    /// preferences, freshly generated user/device identifiers.
    pub fn first_run(now: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            user_id: format!("user_{}", Uuid::new_v4().simple()),
            profile: UserProfile {
                display_name: None,
                preferences: Preferences::default(),
                created_at: now,
                last_active_at: now,
            },
            kana_progress: HashMap::new(),
            statistics: LearningStats::default(),
            metadata: Metadata {
                app_version: env!("CARGO_PKG_VERSION").to_string(),
                last_sync: None,
                device_id: format!("device_{}", Uuid::new_v4().simple()),
                checksum: None,
            },
        }
    }

    /// Count of items currently in the given status.
    pub fn count_by_status(&self, status: super::item::KanaStatus) -> usize {
        self.kana_progress
            .values()
            .filter(|item| item.status == status)
            .count()
    }
}

// ============================================================================
// TESTS
// ============================================================================
