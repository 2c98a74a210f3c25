//! Derived figures: the running balance and per-product sales.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockbook_core::{ProductCode, StockError, StockResult};

use crate::movement::{Movement, MovementKind};

/// Purchase spend, sales revenue, and their difference.
///
/// Every constructor checks its arithmetic, so a `Balance` always holds
/// representable totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub total_purchases: Decimal,
    pub total_sales: Decimal,
    /// `total_sales - total_purchases`.
    pub net: Decimal,
}

impl Balance {
    pub fn new(total_purchases: Decimal, total_sales: Decimal) -> StockResult<Self> {
        let net = total_sales
            .checked_sub(total_purchases)
            .ok_or_else(|| out_of_range("net balance"))?;
        Ok(Self {
            total_purchases,
            total_sales,
            net,
        })
    }

    /// Contribution of a single movement, priced at its recorded unit price.
    pub fn of(movement: &Movement) -> StockResult<Self> {
        let amount = movement.amount()?;
        match movement.kind() {
            MovementKind::Purchase => Self::new(amount, Decimal::ZERO),
            MovementKind::Sale => Self::new(Decimal::ZERO, amount),
        }
    }

    /// Component-wise sum.
    pub fn checked_add(self, rhs: Balance) -> StockResult<Self> {
        let purchases = self
            .total_purchases
            .checked_add(rhs.total_purchases)
            .ok_or_else(|| out_of_range("total purchases"))?;
        let sales = self
            .total_sales
            .checked_add(rhs.total_sales)
            .ok_or_else(|| out_of_range("total sales"))?;
        Self::new(purchases, sales)
    }

    /// Balance over a sequence of movements.
    pub fn total<'a>(movements: impl IntoIterator<Item = &'a Movement>) -> StockResult<Self> {
        movements
            .into_iter()
            .try_fold(Balance::default(), |acc, m| acc.checked_add(Balance::of(m)?))
    }

    /// True when sales cover purchases (`net >= 0`).
    pub fn is_positive(&self) -> bool {
        self.net >= Decimal::ZERO
    }
}

fn out_of_range(what: &str) -> StockError {
    StockError::invalid_input(format!("{what} would be out of range"))
}

/// Units sold for one product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub code: ProductCode,
    pub quantity_sold: i64,
    /// False when the code is no longer in the catalog; its sales are still
    /// counted.
    pub listed: bool,
}

/// Units sold per product code.
///
/// Entries for catalog products come first, in catalog order (including
/// products with no sales). Codes that only appear in the ledger follow in
/// order of first sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesByProduct {
    entries: Vec<ProductSales>,
}

impl SalesByProduct {
    pub(crate) fn seed(codes: impl IntoIterator<Item = ProductCode>) -> Self {
        Self {
            entries: codes
                .into_iter()
                .map(|code| ProductSales {
                    code,
                    quantity_sold: 0,
                    listed: true,
                })
                .collect(),
        }
    }

    /// Set the units sold for `code`, appending an unlisted entry if the
    /// code was not seeded.
    pub(crate) fn set_sold(&mut self, code: &ProductCode, quantity_sold: i64) {
        match self.entries.iter_mut().find(|e| &e.code == code) {
            Some(entry) => entry.quantity_sold = quantity_sold,
            None => self.entries.push(ProductSales {
                code: code.clone(),
                quantity_sold,
                listed: false,
            }),
        }
    }

    pub fn entries(&self) -> &[ProductSales] {
        &self.entries
    }

    pub fn get(&self, code: &ProductCode) -> Option<&ProductSales> {
        self.entries.iter().find(|e| &e.code == code)
    }

    /// Entries by units sold, highest first. Ties keep their original order.
    pub fn ranked(&self) -> Vec<ProductSales> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for SalesByProduct {
    type Item = ProductSales;
    type IntoIter = std::vec::IntoIter<ProductSales>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    #[test]
    fn net_is_sales_minus_purchases() {
        let b = Balance::new(Decimal::from(100), Decimal::from(45)).unwrap();
        assert_eq!(b.net, Decimal::from(-55));
        assert!(!b.is_positive());
        assert!(Balance::default().is_positive());
    }

    #[test]
    fn balances_add_component_wise() {
        let a = Balance::new(Decimal::from(10), Decimal::from(3)).unwrap();
        let b = Balance::new(Decimal::from(1), Decimal::from(20)).unwrap();
        assert_eq!(
            a.checked_add(b).unwrap(),
            Balance::new(Decimal::from(11), Decimal::from(23)).unwrap()
        );
    }

    #[test]
    fn totals_past_decimal_range_are_invalid_input() {
        let big = Balance::new(Decimal::MAX, Decimal::ZERO).unwrap();
        assert!(matches!(big.checked_add(big), Err(StockError::InvalidInput(_))));

        // Each side fits but the difference does not.
        assert!(matches!(
            Balance::new(Decimal::MAX, Decimal::MIN),
            Err(StockError::InvalidInput(_))
        ));
    }

    #[test]
    fn unlisted_codes_are_appended_and_flagged() {
        let mut sales = SalesByProduct::seed([code("A"), code("B")]);
        sales.set_sold(&code("GONE"), 5);
        sales.set_sold(&code("B"), 1);

        let codes: Vec<_> = sales.entries().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "GONE"]);

        let gone = sales.get(&code("GONE")).unwrap();
        assert_eq!(gone.quantity_sold, 5);
        assert!(!gone.listed);
        assert!(sales.get(&code("A")).unwrap().listed);
        assert_eq!(sales.get(&code("B")).unwrap().quantity_sold, 1);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut sales = SalesByProduct::seed([code("A"), code("B"), code("C")]);
        sales.set_sold(&code("B"), 2);
        sales.set_sold(&code("C"), 7);

        let ranked: Vec<_> = sales
            .ranked()
            .into_iter()
            .map(|e| (e.code.to_string(), e.quantity_sold))
            .collect();
        assert_eq!(
            ranked,
            vec![("C".to_string(), 7), ("B".to_string(), 2), ("A".to_string(), 0)]
        );
    }
}
