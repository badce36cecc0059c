//! Statistics Upkeep
//!
//! Session/streak accounting, study-time counters, achievement totals, and
//! milestone awarding. All functions are pure over `(stats, now)`; the
//! progress store calls them with the operation's single wall-clock reading.

use chrono::{DateTime, Datelike, Utc};

use super::aggregate::{LearningProgress, LearningStats, Milestone, MilestoneKind, StreakInfo};
use super::item::KanaStatus;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Hours of inactivity after which the day streak lapses.
pub const STREAK_WINDOW_HOURS: f64 = 24.0;

/// A mastery milestone is awarded every this many mastered kana.
pub const MASTERY_MILESTONE_STEP: u32 = 5;

/// Day-streak lengths that award a milestone.
pub const STREAK_MILESTONES: &[u32] = &[3, 7, 14, 30, 100];

/// Cumulative review counts that award a milestone.
pub const REVIEW_MILESTONES: &[u32] = &[50, 100, 250, 500, 1000];

/// A perfect-week milestone is awarded every this many perfect days.
pub const PERFECT_WEEK_DAYS: u32 = 7;

// ============================================================================
// SESSIONS & STREAKS
// ============================================================================

/// Record one completed study session.
///
/// Streak rule: a second session on the same calendar day leaves the streak
/// alone, a session on the next day extends it, and any gap resets it to 1.
/// The `today`/`thisWeek` time counters roll over on calendar-day and
/// ISO-week boundaries; `goal_met` marks the day as perfect.
pub fn record_session(stats: &mut LearningStats, seconds: i64, goal_met: bool, now: DateTime<Utc>) {
    let today = now.date_naive();
    let last = stats.sessions.last_session_date;

    match last.map(|d| d.date_naive()) {
        None => stats.sessions.current_streak = 1,
        Some(last_day) if last_day == today => {}
        Some(last_day) if (today - last_day).num_days() == 1 => {
            stats.sessions.current_streak += 1;
        }
        Some(_) => stats.sessions.current_streak = 1,
    }
    stats.sessions.longest_streak = stats.sessions.longest_streak.max(stats.sessions.current_streak);

    if last.map(|d| d.date_naive()) != Some(today) {
        stats.time_spent.today = 0;
    }
    if last.map(|d| d.date_naive().iso_week()) != Some(today.iso_week()) {
        stats.time_spent.this_week = 0;
    }

    stats.sessions.total += 1;
    stats.sessions.last_session_date = Some(now);
    stats.time_spent.total += seconds;
    stats.time_spent.today += seconds;
    stats.time_spent.this_week += seconds;
    stats.time_spent.average = stats.time_spent.total / i64::from(stats.sessions.total);

    if goal_met {
        stats.achievements.perfect_days += 1;
    }

    award_milestones(stats, now);
}

/// Streak snapshot for reminder surfaces.
pub fn streak_info(stats: &LearningStats, now: DateTime<Utc>) -> StreakInfo {
    let (hours_until_break, will_break_today) = match stats.sessions.last_session_date {
        None => (STREAK_WINDOW_HOURS, false),
        Some(last) => {
            let hours_since = (now - last).num_seconds() as f64 / 3600.0;
            (
                (STREAK_WINDOW_HOURS - hours_since).max(0.0),
                hours_since > STREAK_WINDOW_HOURS,
            )
        }
    };

    StreakInfo {
        current: stats.sessions.current_streak,
        longest: stats.sessions.longest_streak,
        hours_until_break,
        will_break_today,
    }
}

// ============================================================================
// ACHIEVEMENTS & MILESTONES
// ============================================================================

/// Account for one completed review interaction.
///
/// `totalKanaMastered` is derived from the item map rather than incremented,
/// so demotions out of mastered are reflected too.
pub fn record_review(progress: &mut LearningProgress, now: DateTime<Utc>) {
    progress.statistics.achievements.total_reviews += 1;
    progress.statistics.achievements.total_kana_mastered =
        progress.count_by_status(KanaStatus::Mastered) as u32;
    award_milestones(&mut progress.statistics, now);
}

/// Append milestones for every threshold the counters have crossed.
///
/// Awarding is idempotent: a `(kind, value)` pair is appended at most once,
/// and existing milestones are never removed, even if the counter that
/// earned them later drops back below the threshold.
pub fn award_milestones(stats: &mut LearningStats, now: DateTime<Utc>) {
    let mastered = stats.achievements.total_kana_mastered;
    let reviews = stats.achievements.total_reviews;
    let streak = stats.sessions.current_streak;
    let perfect_days = stats.achievements.perfect_days;

    let mut step = MASTERY_MILESTONE_STEP;
    while step <= mastered {
        push_once(stats, MilestoneKind::KanaMastered, step, now);
        step += MASTERY_MILESTONE_STEP;
    }

    for &threshold in STREAK_MILESTONES {
        if streak >= threshold {
            push_once(stats, MilestoneKind::Streak, threshold, now);
        }
    }

    for &threshold in REVIEW_MILESTONES {
        if reviews >= threshold {
            push_once(stats, MilestoneKind::TotalReviews, threshold, now);
        }
    }

    let mut week = PERFECT_WEEK_DAYS;
    while week <= perfect_days {
        push_once(stats, MilestoneKind::PerfectWeek, week, now);
        week += PERFECT_WEEK_DAYS;
    }
}

fn push_once(stats: &mut LearningStats, kind: MilestoneKind, value: u32, now: DateTime<Utc>) {
    let exists = stats
        .achievements
        .milestones
        .iter()
        .any(|m| m.kind == kind && m.value == value);
    if !exists {
        stats.achievements.milestones.push(Milestone {
            kind,
            value,
            achieved_at: now,
            celebrated: false,
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================
