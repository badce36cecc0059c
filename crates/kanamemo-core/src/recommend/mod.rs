//! Recommendation Engine
//!
//! Greedy, stateless ranking of which kana to practice next. Candidates are
//! the members of the requested gojuon rows in table order; each is scored
//! by urgency and the top ten keys are returned. Nothing is persisted - the
//! ranking is recomputed on demand from the current aggregate.
//!
//! ## Scoring
//!
//! | Signal                    | Contribution                        |
//! |---------------------------|-------------------------------------|
//! | never seen (no record)    | 100, outranks everything            |
//! | status base               | new 90, learning 70, reviewing 50,  |
//! |                           | mastered 10, suspended 0            |
//! | overdue review            | 10 per day overdue, capped at 50    |
//! | difficulty                | `difficulty * 20`                   |
//! | shaky confidence          | `(1 - confidence) * 15`             |
//!
//! Ties keep the candidate flatten order (the sort is stable).

use chrono::{DateTime, Utc};

use crate::gojuon;
use crate::progress::{KanaItem, KanaStatus, LearningProgress};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Score for a kana with no record at all.
pub const SCORE_UNSEEN: f64 = 100.0;

/// Overdue bonus per day past the scheduled review.
pub const OVERDUE_POINTS_PER_DAY: f64 = 10.0;

/// Cap on the total overdue bonus.
pub const OVERDUE_BONUS_CAP: f64 = 50.0;

/// Weight of the item difficulty signal.
pub const DIFFICULTY_WEIGHT: f64 = 20.0;

/// Weight of the inverted-confidence signal.
pub const UNCERTAINTY_WEIGHT: f64 = 15.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

// ============================================================================
// SCORING
// ============================================================================

fn status_base(status: KanaStatus) -> f64 {
    match status {
        KanaStatus::New => 90.0,
        KanaStatus::Learning => 70.0,
        KanaStatus::Reviewing => 50.0,
        KanaStatus::Mastered => 10.0,
        KanaStatus::Suspended => 0.0,
    }
}

/// Priority score for one candidate; `None` means no recorded history.
pub fn priority(item: Option<&KanaItem>, now: DateTime<Utc>) -> f64 {
    let Some(item) = item else {
        return SCORE_UNSEEN;
    };

    let mut score = status_base(item.status);

    if let Some(due) = item.next_review {
        let overdue_days = (now - due).num_seconds() as f64 / SECONDS_PER_DAY;
        if overdue_days > 0.0 {
            score += (overdue_days * OVERDUE_POINTS_PER_DAY).min(OVERDUE_BONUS_CAP);
        }
    }

    score += item.difficulty * DIFFICULTY_WEIGHT;
    score += (1.0 - item.confidence) * UNCERTAINTY_WEIGHT;

    score
}

/// Rank the members of the requested rows and return the top keys.
///
/// Unknown row names contribute no candidates. The result holds at most
/// [`MAX_RECOMMENDATIONS`] keys, highest priority first; equal scores keep
/// their row-table order.
pub fn recommendations(
    progress: &LearningProgress,
    rows: &[&str],
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut scored: Vec<(&str, f64)> = rows
        .iter()
        .filter_map(|row| gojuon::row_members(row))
        .flatten()
        .copied()
        .map(|key| (key, priority(progress.kana_progress.get(key), now)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored.into_iter().map(|(key, _)| key.to_string()).collect()
}

// ============================================================================
// TESTS
// ============================================================================
