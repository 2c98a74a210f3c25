//! Catalog domain module.
//!
//! Owns the product set: code uniqueness, derived sell prices, and the stock
//! counters the ledger moves. Pure domain logic only (no IO, no storage).

pub mod catalog;
pub mod event;
pub mod product;

pub use catalog::Catalog;
pub use event::{CatalogEvent, ProductRegistered, ProductRemoved};
pub use product::{Product, RegisterProduct};
