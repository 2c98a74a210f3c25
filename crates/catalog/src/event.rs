use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::ProductCode;
use stockbook_events::Event;

use crate::product::Product;

/// Event: ProductRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRegistered {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub code: ProductCode,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductRegistered(ProductRegistered),
    ProductRemoved(ProductRemoved),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductRegistered(_) => "catalog.product.registered",
            CatalogEvent::ProductRemoved(_) => "catalog.product.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductRegistered(e) => e.occurred_at,
            CatalogEvent::ProductRemoved(e) => e.occurred_at,
        }
    }
}
