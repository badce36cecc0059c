//! Test Harness
//!
//! Shared helpers for the end-to-end tests: progress stores over isolated
//! in-memory or temporary on-disk slot stores.

use std::sync::Arc;

use kanamemo_core::{
    FileSlotStore, LoadSource, MemorySlotStore, ProgressRepository, ProgressStore,
};
use tempfile::TempDir;

/// A progress store over a shared in-memory slot store.
///
/// The slot store is returned too so tests can inject faults or inspect the
/// raw slot contents.
pub async fn memory_store() -> (Arc<MemorySlotStore>, ProgressStore, LoadSource) {
    let slots = Arc::new(MemorySlotStore::new());
    let repository = ProgressRepository::new(slots.clone());
    let (store, source) = ProgressStore::open(repository)
        .await
        .expect("failed to open progress store");
    (slots, store, source)
}

/// Reopen a store over the same slots, as a fresh app start would.
pub async fn reopen(slots: Arc<MemorySlotStore>) -> (ProgressStore, LoadSource) {
    ProgressStore::open(ProgressRepository::new(slots))
        .await
        .expect("failed to reopen progress store")
}

/// A progress store persisted to a temporary directory.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub async fn disk_store(dir: &TempDir) -> (ProgressStore, LoadSource) {
    let slots = Arc::new(
        FileSlotStore::new(Some(dir.path().to_path_buf())).expect("failed to create slot store"),
    );
    ProgressStore::open(ProgressRepository::new(slots))
        .await
        .expect("failed to open progress store")
}
