//! Snapshot persistence boundary.
//!
//! The service saves a full snapshot after every successful mutation and loads
//! one at startup. Stores make no assumptions about the domain beyond the
//! `Snapshot` shape.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::JsonFileStore;

use std::sync::Arc;

use thiserror::Error;

use crate::snapshot::Snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Durable home for the full state.
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved snapshot; `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}
