//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StockError;

/// Code that identifies a product in the catalog.
///
/// Movements hold a copy of the code rather than a reference to the product,
/// so a movement outlives the product it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductCode(String);

impl ProductCode {
    /// Parse a code from user input. Surrounding whitespace is dropped and the
    /// remainder must not be empty.
    pub fn parse(raw: &str) -> Result<Self, StockError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StockError::invalid_input("product code cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductCode {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductCode {
    type Error = StockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductCode> for String {
    fn from(value: ProductCode) -> Self {
        value.0
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a recorded movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(Uuid);

impl MovementId {
    /// Create a new identifier (UUIDv7, so ids sort by creation time).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MovementId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for MovementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MovementId {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| StockError::invalid_input(format!("MovementId: {e}")))?;
        Ok(Self(uuid))
    }
}
