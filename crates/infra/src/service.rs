//! The stock book service: one lock around catalog + ledger, persistence after
//! every successful mutation, and a completion event per mutation.
//!
//! ```text
//! call → lock → validate + mutate (domain) → save snapshot → publish event → unlock
//! ```
//!
//! A rejected call changes nothing, saves nothing, and publishes nothing.
//! Saving happens after the in-memory change; if the save fails the change
//! stands and the caller gets `ServiceError::Store` (there is no rollback).

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use stockbook_catalog::{
    Catalog, CatalogEvent, Product, ProductRegistered, ProductRemoved, RegisterProduct,
};
use stockbook_core::{ProductCode, StockError};
use stockbook_events::{Event, EventBus, EventEnvelope, Subscription};
use stockbook_ledger::{
    Balance, Ledger, LedgerEvent, Movement, MovementRecorded, RecordMovement, SalesByProduct,
};

use crate::event::StockbookEvent;
use crate::snapshot::Snapshot;
use crate::store::{SnapshotStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] StockError),

    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),

    #[error("stock book lock poisoned")]
    Poisoned,
}

/// Listing order for movements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovementOrder {
    /// Oldest first (the ledger's own order).
    #[default]
    Chronological,
    /// Newest first.
    Recent,
}

#[derive(Debug, Default)]
struct Books {
    catalog: Catalog,
    ledger: Ledger,
    /// Sequence number of the last published event.
    published: u64,
}

/// Catalog + ledger behind a single mutex, wired to a snapshot store and an
/// event bus.
#[derive(Debug)]
pub struct Stockbook<S, B> {
    books: Mutex<Books>,
    store: S,
    bus: B,
}

impl<S, B> Stockbook<S, B>
where
    S: SnapshotStore,
    B: EventBus<EventEnvelope<StockbookEvent>>,
{
    /// Start with an empty catalog and ledger. Nothing is loaded or saved.
    pub fn new(store: S, bus: B) -> Self {
        Self {
            books: Mutex::new(Books::default()),
            store,
            bus,
        }
    }

    /// Start from whatever the store holds (empty if it holds nothing).
    pub fn open(store: S, bus: B) -> Result<Self, ServiceError> {
        let (catalog, ledger) = match store.load()? {
            Some(snapshot) => snapshot.restore()?,
            None => (Catalog::new(), Ledger::new()),
        };
        tracing::info!(
            products = catalog.len(),
            movements = ledger.len(),
            "stock book loaded"
        );

        Ok(Self {
            books: Mutex::new(Books {
                catalog,
                ledger,
                published: 0,
            }),
            store,
            bus,
        })
    }

    pub fn subscribe(&self) -> Subscription<EventEnvelope<StockbookEvent>> {
        self.bus.subscribe()
    }

    pub fn register_product(&self, cmd: RegisterProduct) -> Result<Product, ServiceError> {
        let mut books = self.lock()?;
        let product = books.catalog.register(cmd).inspect_err(|e| {
            tracing::warn!(error = %e, error_kind = e.kind(), "product registration rejected");
        })?;

        tracing::info!(
            product_code = %product.code(),
            cost = %product.cost(),
            margin = %product.margin(),
            stock = product.stock(),
            "product registered"
        );

        let event = CatalogEvent::ProductRegistered(ProductRegistered {
            product: product.clone(),
            occurred_at: Utc::now(),
        });
        self.commit(&mut books, event.into())?;
        Ok(product)
    }

    pub fn remove_product(&self, code: &ProductCode) -> Result<Product, ServiceError> {
        let mut books = self.lock()?;
        let removed = books.catalog.remove(code).inspect_err(|e| {
            tracing::warn!(error = %e, product_code = %code, "product removal rejected");
        })?;

        tracing::info!(product_code = %code, "product removed");

        let event = CatalogEvent::ProductRemoved(ProductRemoved {
            code: code.clone(),
            occurred_at: Utc::now(),
        });
        self.commit(&mut books, event.into())?;
        Ok(removed)
    }

    pub fn record_movement(&self, cmd: RecordMovement) -> Result<Movement, ServiceError> {
        let mut books = self.lock()?;
        let Books { catalog, ledger, .. } = &mut *books;

        let movement = ledger.record(catalog, cmd).inspect_err(|e| {
            tracing::warn!(error = %e, error_kind = e.kind(), "movement rejected");
        })?;
        let stock_after = catalog
            .get(movement.product_code())
            .map(|p| p.stock())
            .unwrap_or_default();

        tracing::info!(
            product_code = %movement.product_code(),
            kind = %movement.kind(),
            quantity = movement.quantity(),
            unit_price = %movement.unit_price(),
            stock_after,
            "movement recorded"
        );

        let event = LedgerEvent::MovementRecorded(MovementRecorded {
            movement: movement.clone(),
            stock_after,
        });
        self.commit(&mut books, event.into())?;
        Ok(movement)
    }

    pub fn product(&self, code: &ProductCode) -> Result<Option<Product>, ServiceError> {
        Ok(self.lock()?.catalog.get(code).cloned())
    }

    /// All products in registration order.
    pub fn products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.lock()?.catalog.all().to_vec())
    }

    pub fn movements(&self, order: MovementOrder) -> Result<Vec<Movement>, ServiceError> {
        let books = self.lock()?;
        Ok(match order {
            MovementOrder::Chronological => books.ledger.all().to_vec(),
            MovementOrder::Recent => books.ledger.recent().cloned().collect(),
        })
    }

    pub fn balance(&self) -> Result<Balance, ServiceError> {
        Ok(self.lock()?.ledger.balance())
    }

    pub fn sales_by_product(&self) -> Result<SalesByProduct, ServiceError> {
        let books = self.lock()?;
        Ok(books.ledger.sales_by_product(&books.catalog))
    }

    /// Export the current state without touching the store.
    pub fn snapshot(&self) -> Result<Snapshot, ServiceError> {
        let books = self.lock()?;
        Ok(Snapshot::capture(&books.catalog, &books.ledger))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Books>, ServiceError> {
        self.books.lock().map_err(|_| ServiceError::Poisoned)
    }

    /// Persist, then publish. Runs with the lock held so saves and events
    /// come out in mutation order.
    fn commit(&self, books: &mut Books, event: StockbookEvent) -> Result<(), ServiceError> {
        let snapshot = Snapshot::capture(&books.catalog, &books.ledger);
        self.store.save(&snapshot).inspect_err(|e| {
            tracing::error!(
                error = %e,
                event_type = event.event_type(),
                "failed to persist stock book"
            );
        })?;

        books.published += 1;
        let envelope = EventEnvelope::new(Uuid::now_v7(), books.published, event);
        if let Err(e) = self.bus.publish(envelope) {
            tracing::warn!(error = ?e, "event publication failed");
        }
        Ok(())
    }
}
