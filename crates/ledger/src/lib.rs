//! Ledger & accounting module.
//!
//! Records purchases and sales against the catalog and derives totals from
//! the recorded movements. Pure domain logic only: no IO, no persistence.

pub mod event;
pub mod ledger;
pub mod movement;
pub mod report;

pub use event::{LedgerEvent, MovementRecorded};
pub use ledger::Ledger;
pub use movement::{Movement, MovementKind, RecordMovement};
pub use report::{Balance, ProductSales, SalesByProduct};
