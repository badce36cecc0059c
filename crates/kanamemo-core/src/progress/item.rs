//! Kana Item - per-symbol learning state
//!
//! One record per alphabet symbol: exposure/interaction counters, quality
//! signals, SM-2 scheduling state, and the status lifecycle
//! (new -> learning -> reviewing -> mastered, plus suspend/resume).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::srs::{self, DEFAULT_EASE_FACTOR, RECALL_THRESHOLD};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Confidence gained by one successful recall.
pub const CONFIDENCE_GAIN: f64 = 0.1;

/// Confidence lost by one failed recall.
pub const CONFIDENCE_PENALTY: f64 = 0.2;

/// Confidence required before an item can be considered mastered.
pub const MASTERY_CONFIDENCE: f64 = 0.8;

/// Review interval (days) that must be exceeded before mastery.
pub const MASTERY_INTERVAL_DAYS: i64 = 30;

/// Confidence above which a resumed item returns to reviewing
/// rather than learning.
pub const RESUME_CONFIDENCE: f64 = 0.5;

/// Difficulty assigned to freshly created items.
pub const DEFAULT_DIFFICULTY: f64 = 0.5;

// ============================================================================
// STATUS
// ============================================================================

/// Lifecycle status of a learnable kana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KanaStatus {
    /// Created but never actively answered.
    #[default]
    New,
    /// Recently failed or still being acquired.
    Learning,
    /// In the regular review cycle.
    Reviewing,
    /// Confidently recalled on a long interval. Not terminal: a failed
    /// recall demotes back to learning.
    Mastered,
    /// Excluded from study; history preserved, counters frozen.
    Suspended,
}

impl KanaStatus {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            KanaStatus::New => "new",
            KanaStatus::Learning => "learning",
            KanaStatus::Reviewing => "reviewing",
            KanaStatus::Mastered => "mastered",
            KanaStatus::Suspended => "suspended",
        }
    }

    /// Parse from string name.
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "new" => KanaStatus::New,
            "learning" => KanaStatus::Learning,
            "reviewing" => KanaStatus::Reviewing,
            "mastered" => KanaStatus::Mastered,
            "suspended" => KanaStatus::Suspended,
            _ => KanaStatus::New,
        }
    }
}

impl std::fmt::Display for KanaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// A progress action applied to one kana.
///
/// Each variant carries exactly the payload its transition needs. The enum
/// is closed: adding a new action kind forces a new match arm in
/// [`KanaItem::apply`] instead of silently falling through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressAction {
    /// The symbol was shown to the user.
    Expose,
    /// The user actively answered, with a 0-5 recall quality.
    Interact { quality: u8 },
    /// Exclude the item from study without losing history.
    Suspend,
    /// Return a suspended item to the study cycle.
    Resume,
    /// Reinitialize the item to its creation defaults.
    Reset,
}

// ============================================================================
// KANA ITEM
// ============================================================================

/// Learning history and scheduling state for one kana symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanaItem {
    /// Times the symbol was shown.
    pub exposures: u32,
    /// Times the symbol was actively answered.
    pub interactions: u32,
    /// Recall confidence in `[0, 1]`.
    pub confidence: f64,
    /// Retention estimate in `[0, 1]` (reserved; not updated by the scheduler).
    pub retention: f64,
    /// When the item was first created.
    pub first_seen: DateTime<Utc>,
    /// Last exposure or interaction.
    pub last_seen: DateTime<Utc>,
    /// When the item last reached mastered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_mastered: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: KanaStatus,
    /// Difficulty weight in `[0, 1]` (reserved for future tuning).
    pub difficulty: f64,
    /// Current review interval in days.
    pub interval: i64,
    /// SM-2 ease factor, floored at 1.3.
    pub ease_factor: f64,
    /// Next scheduled review, set by interactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
}

impl KanaItem {
    /// Creation defaults for a symbol seen for the first time.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            exposures: 0,
            interactions: 0,
            confidence: 0.0,
            retention: 0.0,
            first_seen: now,
            last_seen: now,
            last_mastered: None,
            status: KanaStatus::New,
            difficulty: DEFAULT_DIFFICULTY,
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review: None,
        }
    }

    /// Whether the item is due for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map(|t| t <= now).unwrap_or(true)
    }

    /// Apply one action to the item.
    ///
    /// `now` is the single wall-clock reading for the whole operation, so
    /// `last_seen`, `next_review` and `last_mastered` cannot skew apart.
    pub fn apply(&mut self, action: &ProgressAction, now: DateTime<Utc>) {
        match action {
            ProgressAction::Expose => {
                self.exposures += 1;
                self.last_seen = now;
            }
            ProgressAction::Interact { quality } => {
                self.exposures += 1;
                self.interactions += 1;
                self.last_seen = now;

                let update = srs::calculate_next_review(self.interval, self.ease_factor, *quality);
                self.interval = update.interval;
                self.ease_factor = update.ease_factor;
                // Intervals have no ceiling; a date past the representable
                // range leaves the item unscheduled rather than overflowing.
                self.next_review = Duration::try_days(update.interval)
                    .and_then(|days| now.checked_add_signed(days));

                if *quality >= RECALL_THRESHOLD {
                    self.confidence = (self.confidence + CONFIDENCE_GAIN).min(1.0);
                    if self.confidence >= MASTERY_CONFIDENCE && self.interval > MASTERY_INTERVAL_DAYS
                    {
                        self.status = KanaStatus::Mastered;
                        self.last_mastered = Some(now);
                    } else {
                        self.status = KanaStatus::Reviewing;
                    }
                } else {
                    self.confidence = (self.confidence - CONFIDENCE_PENALTY).max(0.0);
                    self.status = KanaStatus::Learning;
                }
            }
            ProgressAction::Suspend => {
                self.status = KanaStatus::Suspended;
            }
            ProgressAction::Resume => {
                if self.status == KanaStatus::Suspended {
                    self.status = if self.confidence > RESUME_CONFIDENCE {
                        KanaStatus::Reviewing
                    } else {
                        KanaStatus::Learning
                    };
                }
            }
            ProgressAction::Reset => {
                *self = Self::new(now);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
