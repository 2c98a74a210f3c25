//! Domain events and the in-process bus that distributes them.
//!
//! Domain crates define their own event enums and implement [`Event`]; the
//! orchestrator wraps them in an [`EventEnvelope`] and publishes them on an
//! [`EventBus`] once a mutation has completed.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
