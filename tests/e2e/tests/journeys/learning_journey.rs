//! Learning Journey
//!
//! Drives a complete study workflow through the public API: first run,
//! practicing a row to mastery, suspension, statistics, and persistence
//! across restarts.

use kanamemo_e2e_tests::{disk_store, memory_store, reopen};
use kanamemo_core::{KanaStatus, LoadSource, ProgressAction};
use tempfile::TempDir;

#[tokio::test]
async fn first_run_creates_default_aggregate() {
    let (_slots, store, source) = memory_store().await;

    assert_eq!(source, LoadSource::Fresh);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.version, kanamemo_core::SCHEMA_VERSION);
    assert!(snapshot.kana_progress.is_empty());
    assert_eq!(store.status_of("ka"), KanaStatus::New);
}

#[tokio::test]
async fn practicing_a_row_to_mastery() {
    let (_slots, mut store, _) = memory_store().await;

    // Browse the か行 row once, then drill "ka" with perfect recall.
    for key in ["ka", "ki", "ku", "ke", "ko"] {
        store.apply(key, ProgressAction::Expose).await.unwrap();
    }
    for _ in 0..10 {
        store
            .apply("ka", ProgressAction::Interact { quality: 5 })
            .await
            .unwrap();
    }

    assert_eq!(store.status_of("ka"), KanaStatus::Mastered);
    assert_eq!(store.status_of("ki"), KanaStatus::New);

    let snapshot = store.snapshot();
    let ka = &snapshot.kana_progress["ka"];
    assert_eq!(ka.exposures, 11);
    assert_eq!(ka.interactions, 10);
    assert!(ka.last_mastered.is_some());
    assert_eq!(snapshot.statistics.achievements.total_reviews, 10);
    assert_eq!(snapshot.statistics.achievements.total_kana_mastered, 1);

    // A mastered item falls to the back of the recommendation queue.
    let ranked = store.recommendations(&["か行"]);
    assert_eq!(ranked.last().map(String::as_str), Some("ka"));
}

#[tokio::test]
async fn failing_a_mastered_kana_demotes_it() {
    let (_slots, mut store, _) = memory_store().await;

    for _ in 0..10 {
        store
            .apply("no", ProgressAction::Interact { quality: 5 })
            .await
            .unwrap();
    }
    assert_eq!(store.status_of("no"), KanaStatus::Mastered);

    store
        .apply("no", ProgressAction::Interact { quality: 0 })
        .await
        .unwrap();

    assert_eq!(store.status_of("no"), KanaStatus::Learning);
    // The derived mastered count follows the demotion.
    assert_eq!(store.stats().achievements.total_kana_mastered, 0);
}

#[tokio::test]
async fn suspend_and_resume_cycle() {
    let (_slots, mut store, _) = memory_store().await;

    store
        .apply("wa", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap();
    store.apply("wa", ProgressAction::Suspend).await.unwrap();
    assert_eq!(store.status_of("wa"), KanaStatus::Suspended);

    // Suspended items rank below everything else in their row.
    let ranked = store.recommendations(&["わ行"]);
    assert_eq!(ranked.last().map(String::as_str), Some("wa"));

    store.apply("wa", ProgressAction::Resume).await.unwrap();
    assert_eq!(store.status_of("wa"), KanaStatus::Learning);
}

#[tokio::test]
async fn sessions_build_streaks_and_milestones() {
    let (_slots, mut store, _) = memory_store().await;

    store.record_session(600, true).await.unwrap();

    let stats = store.stats();
    assert_eq!(stats.sessions.total, 1);
    assert_eq!(stats.sessions.current_streak, 1);
    assert_eq!(stats.time_spent.total, 600);
    assert_eq!(stats.achievements.perfect_days, 1);

    let info = store.streak_info();
    assert_eq!(info.current, 1);
    assert!(!info.will_break_today);
    assert!(info.hours_until_break > 23.0);

    // 50 reviews cross the first review milestone; celebrate it once.
    for _ in 0..50 {
        store
            .apply("ra", ProgressAction::Interact { quality: 3 })
            .await
            .unwrap();
    }
    let uncelebrated = store.uncelebrated_milestones();
    assert!(!uncelebrated.is_empty());
    let index = uncelebrated[0].0;
    assert!(store.mark_milestone_celebrated(index).await.unwrap());
    assert!(!store.mark_milestone_celebrated(index).await.unwrap());
}

#[tokio::test]
async fn state_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();

    {
        let (mut store, source) = disk_store(&dir).await;
        assert_eq!(source, LoadSource::Fresh);
        store
            .apply("te", ProgressAction::Interact { quality: 4 })
            .await
            .unwrap();
        store.record_session(300, false).await.unwrap();
    }

    let (store, source) = disk_store(&dir).await;
    assert_eq!(source, LoadSource::Loaded);
    assert_eq!(store.status_of("te"), KanaStatus::Reviewing);
    assert_eq!(store.stats().sessions.total, 1);
    assert_eq!(store.stats().time_spent.total, 300);
}

#[tokio::test]
async fn reset_scoping_survives_restart() {
    let (slots, mut store, _) = memory_store().await;
    store.apply("ka", ProgressAction::Expose).await.unwrap();
    store.apply("ki", ProgressAction::Expose).await.unwrap();

    store.reset(Some(&["ka"])).await.unwrap();

    let (reopened, _) = reopen(slots).await;
    assert!(!reopened.snapshot().kana_progress.contains_key("ka"));
    assert!(reopened.snapshot().kana_progress.contains_key("ki"));
}
