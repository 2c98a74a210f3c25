//! Domain error model.

use thiserror::Error;

use crate::id::ProductCode;

/// Result type used across the domain layer.
pub type StockResult<T> = Result<T, StockError>;

/// Domain-level error.
///
/// Every variant is an expected, recoverable condition that the caller turns
/// into user feedback. Storage and transport failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// A product with this code is already registered.
    #[error("a product with code {0} already exists")]
    DuplicateCode(ProductCode),

    /// The product to remove is not in the catalog.
    #[error("product {0} not found")]
    NotFound(ProductCode),

    /// A movement referenced a product that is not in the catalog.
    #[error("unknown product {0}")]
    UnknownProduct(ProductCode),

    /// Movement quantities must be strictly positive.
    #[error("quantity must be a positive integer (got {0})")]
    InvalidQuantity(i64),

    /// A sale asked for more units than are on hand.
    #[error("insufficient stock for {code}: requested {requested}, available {available}")]
    InsufficientStock {
        code: ProductCode,
        requested: i64,
        available: i64,
    },

    /// A value failed validation (e.g. a number that does not parse).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StockError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StockError::DuplicateCode(_) => "duplicate_code",
            StockError::NotFound(_) => "not_found",
            StockError::UnknownProduct(_) => "unknown_product",
            StockError::InvalidQuantity(_) => "invalid_quantity",
            StockError::InsufficientStock { .. } => "insufficient_stock",
            StockError::InvalidInput(_) => "invalid_input",
        }
    }
}
