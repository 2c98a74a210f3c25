use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockbook_core::{MovementId, ProductCode, StockError, StockResult};

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Purchase,
    Sale,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::Purchase => "purchase",
            MovementKind::Sale => "sale",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "purchase" => Ok(MovementKind::Purchase),
            "sale" => Ok(MovementKind::Sale),
            other => Err(StockError::invalid_input(format!(
                "movement kind must be one of: purchase, sale (got {other:?})"
            ))),
        }
    }
}

/// One recorded purchase or sale (immutable).
///
/// `product_code` is a plain copy of the code, so the movement survives the
/// product being removed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    id: MovementId,
    occurred_at: DateTime<Utc>,
    product_code: ProductCode,
    kind: MovementKind,
    quantity: i64,
    /// Cost for a purchase, sell price for a sale, as of recording time.
    unit_price: Decimal,
}

impl Movement {
    pub(crate) fn new(
        occurred_at: DateTime<Utc>,
        product_code: ProductCode,
        kind: MovementKind,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: MovementId::new(),
            occurred_at,
            product_code,
            kind,
            quantity,
            unit_price,
        }
    }

    pub fn id(&self) -> MovementId {
        self.id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn product_code(&self) -> &ProductCode {
        &self.product_code
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `quantity * unit_price`, or `InvalidInput` if that does not fit a
    /// `Decimal`. The ledger refuses such movements, so recorded ones always
    /// have an amount.
    pub fn amount(&self) -> StockResult<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| {
                StockError::invalid_input(format!(
                    "amount of {} x {} for {} is out of range",
                    self.quantity, self.unit_price, self.product_code
                ))
            })
    }
}

/// Command: RecordMovement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMovement {
    pub product_code: ProductCode,
    pub kind: MovementKind,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

impl RecordMovement {
    /// Command stamped with the current time.
    pub fn now(product_code: ProductCode, kind: MovementKind, quantity: i64) -> Self {
        Self {
            product_code,
            kind,
            quantity,
            occurred_at: Utc::now(),
        }
    }

    pub fn purchase(product_code: ProductCode, quantity: i64) -> Self {
        Self::now(product_code, MovementKind::Purchase, quantity)
    }

    pub fn sale(product_code: ProductCode, quantity: i64) -> Self {
        Self::now(product_code, MovementKind::Sale, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Sale".parse::<MovementKind>().unwrap(), MovementKind::Sale);
        assert_eq!(" purchase ".parse::<MovementKind>().unwrap(), MovementKind::Purchase);
        assert!(matches!(
            "refund".parse::<MovementKind>(),
            Err(StockError::InvalidInput(_))
        ));
    }

    #[test]
    fn movement_serializes_with_lowercase_kind() {
        let m = Movement::new(
            Utc::now(),
            ProductCode::parse("WIDGET").unwrap(),
            MovementKind::Sale,
            3,
            Decimal::from(15),
        );
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["kind"], "sale");
        assert_eq!(json["product_code"], "WIDGET");
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["unit_price"], "15");

        let back: Movement = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.amount().unwrap(), Decimal::from(45));
    }

    #[test]
    fn amount_out_of_range_is_invalid_input() {
        let m = Movement::new(
            Utc::now(),
            ProductCode::parse("BULK").unwrap(),
            MovementKind::Purchase,
            i64::MAX,
            Decimal::from(100_000_000_000i64),
        );
        assert!(matches!(m.amount(), Err(StockError::InvalidInput(_))));
    }
}
