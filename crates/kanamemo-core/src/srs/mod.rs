//! SM-2 Spaced Repetition Scheduler
//!
//! A SuperMemo-2 variant driving per-kana review intervals.
//!
//! Reference: <https://super-memory.com/english/ol/sm2.htm>
//!
//! ## Core behavior
//!
//! - Poor recall (quality < 3) resets the interval to one day.
//! - Successful recall walks the bootstrap steps 0 -> 1 -> 6 days, then
//!   grows multiplicatively: `round(interval * ease_factor)`.
//! - The ease factor moves by `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`
//!   and is floored at 1.3. The adjustment always reads the *original*
//!   ease factor, never the value produced in the same call.
//!
//! The scheduler is a pure function over `(interval, ease_factor, quality)`.
//! Quality is expected in `0..=5`; out-of-range values are the caller's
//! responsibility and are deliberately not clamped here.

// ============================================================================
// CONSTANTS
// ============================================================================

/// Lowest ease factor a card can reach.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor assigned to freshly created items.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Quality at or above which a recall counts as successful.
pub const RECALL_THRESHOLD: u8 = 3;

/// Interval (days) after the first successful recall.
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval (days) after the second successful recall.
pub const SECOND_INTERVAL_DAYS: i64 = 6;

// ============================================================================
// SCHEDULER
// ============================================================================

/// The scheduling state produced by one review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleUpdate {
    /// Days until the next review.
    pub interval: i64,
    /// Updated ease factor (>= [`MIN_EASE_FACTOR`]).
    pub ease_factor: f64,
}

/// Compute the next review interval and ease factor for one recall attempt.
///
/// `interval` and `ease_factor` are the item's current scheduling state;
/// `quality` is the 0-5 recall score for this attempt.
///
/// ```
/// use kanamemo_core::srs::{calculate_next_review, DEFAULT_EASE_FACTOR};
///
/// let first = calculate_next_review(0, DEFAULT_EASE_FACTOR, 4);
/// assert_eq!(first.interval, 1);
///
/// let second = calculate_next_review(first.interval, first.ease_factor, 4);
/// assert_eq!(second.interval, 6);
/// ```
pub fn calculate_next_review(interval: i64, ease_factor: f64, quality: u8) -> ScheduleUpdate {
    let next_interval = if quality < RECALL_THRESHOLD {
        // Failed recall: start over from one day.
        FIRST_INTERVAL_DAYS
    } else if interval == 0 {
        FIRST_INTERVAL_DAYS
    } else if interval == 1 {
        SECOND_INTERVAL_DAYS
    } else {
        (interval as f64 * ease_factor).round() as i64
    };

    let shortfall = f64::from(5 - i32::from(quality));
    let next_ease =
        (ease_factor + (0.1 - shortfall * (0.08 + shortfall * 0.02))).max(MIN_EASE_FACTOR);

    ScheduleUpdate {
        interval: next_interval,
        ease_factor: next_ease,
    }
}

// ============================================================================
// TESTS
// ============================================================================
