//! Storage Recovery
//!
//! Durability guarantees under failure: backup-before-write, write
//! verification with rollback, corruption fallback, and the distinction
//! between recovered and absent data.

use kanamemo_e2e_tests::{memory_store, reopen};
use kanamemo_core::{
    KanaStatus, LoadOutcome, LoadSource, ProgressAction, ProgressError, ProgressRepository,
    BACKUP_SLOT, PRIMARY_SLOT,
};
use std::sync::Arc;

#[tokio::test]
async fn failed_save_preserves_durable_state() {
    let (slots, mut store, _) = memory_store().await;
    store
        .apply("ka", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap();

    slots.fail_writes_to(PRIMARY_SLOT);
    let err = store
        .apply("ki", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::Io(_)));
    assert!(store.last_error().is_some());

    // The in-memory copy kept the optimistic update...
    assert_eq!(store.status_of("ki"), KanaStatus::Reviewing);

    // ...but a restart sees the pre-failure durable state.
    slots.clear_faults();
    let (restarted, source) = reopen(slots).await;
    assert_eq!(source, LoadSource::Loaded);
    assert_eq!(restarted.status_of("ka"), KanaStatus::Reviewing);
    assert_eq!(restarted.status_of("ki"), KanaStatus::New);
}

#[tokio::test]
async fn unverified_save_rolls_back_and_backup_is_honored() {
    let (slots, mut store, _) = memory_store().await;
    store
        .apply("ka", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap();
    let durable_before = store.snapshot();

    slots.corrupt_writes_to(PRIMARY_SLOT);
    let err = store
        .apply("ki", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::WriteVerification(_)));

    // After the failed save, a load returns the pre-save aggregate.
    slots.clear_faults();
    let (restarted, source) = reopen(slots).await;
    assert_eq!(source, LoadSource::Recovered);
    assert_eq!(*restarted.snapshot(), *durable_before);
    assert!(!restarted.snapshot().kana_progress.contains_key("ki"));
}

#[tokio::test]
async fn corrupt_primary_slot_recovers_from_backup() {
    let (slots, mut store, _) = memory_store().await;
    store
        .apply("ka", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap();
    // Second save moves the first payload into the backup slot.
    store
        .apply("ka", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap();

    // Simulate a crash that shredded the primary slot.
    slots.plant(PRIMARY_SLOT, "\u{1f4a5} shredded payload");

    let (restarted, source) = reopen(slots.clone()).await;
    assert_eq!(source, LoadSource::Recovered);
    // Backup held the single-review state.
    assert_eq!(
        restarted.snapshot().kana_progress["ka"].interactions,
        1
    );

    // Recovery healed the primary slot: the next start loads cleanly.
    let (_again, source) = reopen(slots).await;
    assert_eq!(source, LoadSource::Loaded);
}

#[tokio::test]
async fn both_slots_corrupt_degrades_to_fresh_start() {
    let (slots, mut store, _) = memory_store().await;
    store
        .apply("ka", ProgressAction::Interact { quality: 4 })
        .await
        .unwrap();
    let old_user = store.snapshot().user_id.clone();

    slots.plant(PRIMARY_SLOT, "garbage");
    slots.plant(BACKUP_SLOT, "also garbage");

    let (restarted, source) = reopen(slots).await;
    assert_eq!(source, LoadSource::Fresh);
    assert!(restarted.snapshot().kana_progress.is_empty());
    assert_ne!(restarted.snapshot().user_id, old_user);
    // The data loss is not silent: the decode failure stays observable.
    assert!(matches!(
        restarted.last_error(),
        Some(ProgressError::Decode(_))
    ));
}

#[tokio::test]
async fn absent_and_recovered_are_distinguishable() {
    let slots = Arc::new(kanamemo_core::MemorySlotStore::new());
    let repository = ProgressRepository::new(slots.clone());

    // Nothing stored at all.
    assert_eq!(repository.load().await.unwrap(), LoadOutcome::Absent);

    // Store something, then corrupt only the primary slot.
    let (slots, mut store, _) = memory_store().await;
    store
        .apply("ka", ProgressAction::Expose)
        .await
        .unwrap();
    store
        .apply("ka", ProgressAction::Expose)
        .await
        .unwrap();
    slots.plant(PRIMARY_SLOT, "corrupt");

    let repository = ProgressRepository::new(slots);
    assert!(matches!(
        repository.load().await.unwrap(),
        LoadOutcome::Recovered(_)
    ));
}

#[tokio::test]
async fn rapid_fire_actions_settle_on_last_write() {
    let (slots, mut store, _) = memory_store().await;

    // Saves are sequential per store; the durable state after a burst of
    // actions is the final aggregate.
    for quality in [5, 2, 4, 3, 5] {
        store
            .apply("yu", ProgressAction::Interact { quality })
            .await
            .unwrap();
    }
    let final_state = store.snapshot();

    let (restarted, _) = reopen(slots).await;
    assert_eq!(*restarted.snapshot(), *final_state);
    assert_eq!(restarted.snapshot().kana_progress["yu"].interactions, 5);
}
