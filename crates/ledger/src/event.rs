use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_events::Event;

use crate::movement::Movement;

/// Event: MovementRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecorded {
    pub movement: Movement,
    /// Stock of the product right after the movement was applied.
    pub stock_after: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    MovementRecorded(MovementRecorded),
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::MovementRecorded(_) => "ledger.movement.recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::MovementRecorded(e) => e.movement.occurred_at(),
        }
    }
}
