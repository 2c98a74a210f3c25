//! `stockbook-core`: shared building blocks for the stock book.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{StockError, StockResult};
pub use id::{MovementId, ProductCode};
