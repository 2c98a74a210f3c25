//! Infrastructure layer: snapshot persistence and the orchestrating service.

pub mod event;
pub mod service;
pub mod snapshot;
pub mod store;

pub use event::StockbookEvent;
pub use service::{MovementOrder, ServiceError, Stockbook};
pub use snapshot::Snapshot;
pub use store::{InMemorySnapshotStore, JsonFileStore, SnapshotStore, StoreError};
