use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{SnapshotStore, StoreError};
use crate::snapshot::Snapshot;

/// In-memory snapshot store.
///
/// Intended for tests/dev. Counts saves so tests can check when the service
/// persisted.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    saved: RwLock<Option<Snapshot>>,
    saves: AtomicU64,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: RwLock::new(Some(snapshot)),
            saves: AtomicU64::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.saved.read().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let saved = self.saved.read().map_err(|_| StoreError::Poisoned)?;
        Ok(saved.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut saved = self.saved.write().map_err(|_| StoreError::Poisoned)?;
        *saved = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
