use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_catalog::CatalogEvent;
use stockbook_events::Event;
use stockbook_ledger::LedgerEvent;

/// Everything the stock book publishes after a completed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "event", rename_all = "lowercase")]
pub enum StockbookEvent {
    Catalog(CatalogEvent),
    Ledger(LedgerEvent),
}

impl From<CatalogEvent> for StockbookEvent {
    fn from(value: CatalogEvent) -> Self {
        StockbookEvent::Catalog(value)
    }
}

impl From<LedgerEvent> for StockbookEvent {
    fn from(value: LedgerEvent) -> Self {
        StockbookEvent::Ledger(value)
    }
}

impl Event for StockbookEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockbookEvent::Catalog(e) => e.event_type(),
            StockbookEvent::Ledger(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            StockbookEvent::Catalog(e) => e.version(),
            StockbookEvent::Ledger(e) => e.version(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockbookEvent::Catalog(e) => e.occurred_at(),
            StockbookEvent::Ledger(e) => e.occurred_at(),
        }
    }
}
