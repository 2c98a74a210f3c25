use std::path::Path;
use std::sync::Arc;
use std::thread;

use stockbook_events::{Event, EventBus, EventEnvelope, InMemoryEventBus};
use stockbook_infra::{
    InMemorySnapshotStore, JsonFileStore, ServiceError, SnapshotStore, Stockbook, StockbookEvent,
};

pub type SharedStore = Arc<dyn SnapshotStore>;
pub type SharedBus = Arc<InMemoryEventBus<EventEnvelope<StockbookEvent>>>;
pub type AppStockbook = Stockbook<SharedStore, SharedBus>;

/// Everything the handlers need, shared through an axum `Extension`.
pub struct AppServices {
    pub stockbook: AppStockbook,
    pub events: SharedBus,
}

impl AppServices {
    /// Load the stock book from `store` (empty if it holds nothing yet).
    pub fn open(store: SharedStore) -> Result<Self, ServiceError> {
        let events: SharedBus = Arc::new(InMemoryEventBus::new());
        let stockbook = Stockbook::open(store, events.clone())?;
        Ok(Self { stockbook, events })
    }

    /// Stock book persisted as a JSON file at `path`.
    pub fn open_json_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let store: SharedStore = Arc::new(JsonFileStore::new(path.as_ref()));
        Self::open(store)
    }

    /// Volatile stock book (dev/tests).
    pub fn in_memory() -> Self {
        let events: SharedBus = Arc::new(InMemoryEventBus::new());
        let store: SharedStore = Arc::new(InMemorySnapshotStore::new());
        Self {
            stockbook: Stockbook::new(store, events.clone()),
            events,
        }
    }

    /// Log every published event on a background thread.
    ///
    /// The thread exits once the bus is gone.
    pub fn spawn_event_log(&self) -> thread::JoinHandle<()> {
        let subscription = self.events.subscribe();
        thread::spawn(move || {
            while let Ok(envelope) = subscription.recv() {
                tracing::debug!(
                    event_id = %envelope.event_id(),
                    sequence_number = envelope.sequence_number(),
                    event_type = envelope.payload().event_type(),
                    "event published"
                );
            }
        })
    }
}
