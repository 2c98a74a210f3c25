use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for a published event.
///
/// `sequence_number` is monotonically increasing per publisher, starting at 1,
/// so a subscriber can spot gaps or replays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
