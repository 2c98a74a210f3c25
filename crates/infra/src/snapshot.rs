//! Full-state export/import.
//!
//! The product list is stored as `[code, product]` pairs and the movement
//! list as-is, both in their in-memory order.

use serde::{Deserialize, Serialize};

use stockbook_catalog::{Catalog, Product};
use stockbook_core::{ProductCode, StockError, StockResult};
use stockbook_ledger::{Ledger, Movement};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<(ProductCode, Product)>,
    pub movements: Vec<Movement>,
}

impl Snapshot {
    /// Export the current state.
    pub fn capture(catalog: &Catalog, ledger: &Ledger) -> Self {
        Self {
            products: catalog
                .all()
                .iter()
                .map(|p| (p.code().clone(), p.clone()))
                .collect(),
            movements: ledger.all().to_vec(),
        }
    }

    /// Rebuild catalog and ledger.
    ///
    /// Stock comes from the stored products as-is; it is never recomputed from
    /// the movement history.
    pub fn restore(self) -> StockResult<(Catalog, Ledger)> {
        let mut products = Vec::with_capacity(self.products.len());
        for (key, product) in self.products {
            if &key != product.code() {
                return Err(StockError::invalid_input(format!(
                    "snapshot key {key} does not match product code {}",
                    product.code()
                )));
            }
            products.push(product);
        }

        let catalog = Catalog::from_products(products)?;
        let ledger = Ledger::from_movements(self.movements)?;
        Ok((catalog, ledger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockbook_catalog::RegisterProduct;
    use stockbook_ledger::RecordMovement;

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    fn sample() -> (Catalog, Ledger) {
        let mut catalog = Catalog::new();
        for (c, stock) in [("B", 5), ("A", 8)] {
            catalog
                .register(RegisterProduct::new(code(c), Decimal::from(4), Decimal::from(25), stock))
                .unwrap();
        }
        let mut ledger = Ledger::new();
        ledger.record(&mut catalog, RecordMovement::sale(code("A"), 3)).unwrap();
        ledger.record(&mut catalog, RecordMovement::purchase(code("B"), 2)).unwrap();
        (catalog, ledger)
    }

    #[test]
    fn capture_then_restore_reproduces_state() {
        let (catalog, ledger) = sample();
        let json = serde_json::to_string(&Snapshot::capture(&catalog, &ledger)).unwrap();

        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let (catalog2, ledger2) = snapshot.restore().unwrap();

        assert_eq!(catalog2.all(), catalog.all());
        assert_eq!(ledger2.all(), ledger.all());
    }

    #[test]
    fn products_are_written_as_code_product_pairs() {
        let (catalog, ledger) = sample();
        let json = serde_json::to_value(Snapshot::capture(&catalog, &ledger)).unwrap();

        assert_eq!(json["products"][0][0], "B");
        assert_eq!(json["products"][0][1]["code"], "B");
        assert_eq!(json["products"][0][1]["stock"], 7);
        assert_eq!(json["movements"][0]["kind"], "sale");
    }

    #[test]
    fn restore_takes_stock_from_the_snapshot() {
        let (catalog, ledger) = sample();
        let mut json = serde_json::to_value(Snapshot::capture(&catalog, &ledger)).unwrap();
        json["products"][1][1]["stock"] = serde_json::json!(42);

        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        let (restored, _) = snapshot.restore().unwrap();

        assert_eq!(restored.get(&code("A")).unwrap().stock(), 42);
    }

    #[test]
    fn mismatched_key_is_invalid_input() {
        let (catalog, ledger) = sample();
        let mut snapshot = Snapshot::capture(&catalog, &ledger);
        snapshot.products[0].0 = code("Z");

        assert!(matches!(snapshot.restore(), Err(StockError::InvalidInput(_))));
    }
}
