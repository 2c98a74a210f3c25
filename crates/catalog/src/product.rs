use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockbook_core::{ProductCode, StockError, StockResult};

/// A product on the shelf.
///
/// `cost` and `margin` are fixed at registration; `stock` only moves through
/// [`Catalog::adjust_stock`](crate::Catalog::adjust_stock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    code: ProductCode,
    cost: Decimal,
    margin: Decimal,
    stock: i64,
}

impl Product {
    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    /// Unit purchase cost.
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    /// Margin as a percentage over cost (`50` means +50%).
    pub fn margin(&self) -> Decimal {
        self.margin
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// `cost * (1 + margin / 100)`. Always derived, never stored.
    ///
    /// Fails with `InvalidInput` when the result does not fit a `Decimal`;
    /// products in a [`Catalog`](crate::Catalog) are checked at registration,
    /// so for them this always succeeds.
    pub fn sell_price(&self) -> StockResult<Decimal> {
        self.margin
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|markup| Decimal::ONE.checked_add(markup))
            .and_then(|factor| self.cost.checked_mul(factor))
            .ok_or_else(|| {
                StockError::invalid_input(format!(
                    "sell price of {} is out of range (cost {}, margin {})",
                    self.code, self.cost, self.margin
                ))
            })
    }

    pub(crate) fn from_command(cmd: RegisterProduct) -> Self {
        Self {
            code: cmd.code,
            cost: cmd.cost,
            margin: cmd.margin,
            stock: cmd.stock,
        }
    }

    pub(crate) fn set_stock(&mut self, stock: i64) {
        self.stock = stock;
    }

    /// Field checks shared by registration and snapshot restore.
    pub(crate) fn validate(&self) -> StockResult<()> {
        if self.cost < Decimal::ZERO {
            return Err(StockError::invalid_input(format!(
                "cost of {} cannot be negative",
                self.code
            )));
        }
        if self.stock < 0 {
            return Err(StockError::invalid_input(format!(
                "stock of {} cannot be negative",
                self.code
            )));
        }
        self.sell_price()?;
        Ok(())
    }
}

/// Command: RegisterProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProduct {
    pub code: ProductCode,
    pub cost: Decimal,
    pub margin: Decimal,
    pub stock: i64,
}

impl RegisterProduct {
    pub fn new(code: ProductCode, cost: Decimal, margin: Decimal, stock: i64) -> Self {
        Self {
            code,
            cost,
            margin,
            stock,
        }
    }

    /// Build the command from raw form text.
    ///
    /// Any field that does not parse yields `InvalidInput` naming the field.
    pub fn parse(code: &str, cost: &str, margin: &str, stock: &str) -> StockResult<Self> {
        let code = ProductCode::parse(code)?;
        let cost = parse_decimal("cost", cost)?;
        let margin = parse_decimal("margin", margin)?;
        let stock = stock
            .trim()
            .parse::<i64>()
            .map_err(|e| StockError::invalid_input(format!("stock {stock:?}: {e}")))?;

        Ok(Self::new(code, cost, margin, stock))
    }
}

fn parse_decimal(field: &str, raw: &str) -> StockResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| StockError::invalid_input(format!("{field} {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn product(cost: &str, margin: &str) -> Product {
        Product::from_command(RegisterProduct::parse("P", cost, margin, "0").unwrap())
    }

    #[test]
    fn sell_price_applies_margin_percentage() {
        assert_eq!(product("10", "50").sell_price().unwrap(), dec("15"));
        assert_eq!(product("19.99", "0").sell_price().unwrap(), dec("19.99"));
        assert_eq!(product("8", "12.5").sell_price().unwrap(), dec("9"));
    }

    #[test]
    fn negative_margin_is_accepted_and_discounts() {
        assert_eq!(product("10", "-20").sell_price().unwrap(), dec("8"));
    }

    #[test]
    fn out_of_range_sell_price_is_invalid_input() {
        let p = product(&Decimal::MAX.to_string(), "100");
        assert!(matches!(p.sell_price(), Err(StockError::InvalidInput(_))));
        assert!(matches!(p.validate(), Err(StockError::InvalidInput(_))));

        // Zero margin leaves the largest cost representable.
        let at_cost = product(&Decimal::MAX.to_string(), "0");
        assert_eq!(at_cost.sell_price().unwrap(), Decimal::MAX);
    }

    #[test]
    fn parse_trims_fields() {
        let cmd = RegisterProduct::parse(" WIDGET ", " 10.50 ", "50", " 5 ").unwrap();
        assert_eq!(cmd.code.as_str(), "WIDGET");
        assert_eq!(cmd.cost, dec("10.50"));
        assert_eq!(cmd.margin, dec("50"));
        assert_eq!(cmd.stock, 5);
    }

    #[test]
    fn parse_rejects_non_numeric_fields() {
        for (cost, margin, stock) in [("abc", "50", "1"), ("10", "", "1"), ("10", "50", "2.5")] {
            let err = RegisterProduct::parse("P", cost, margin, stock).unwrap_err();
            assert!(
                matches!(err, StockError::InvalidInput(_)),
                "expected InvalidInput for ({cost:?}, {margin:?}, {stock:?}), got {err:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_negative_cost_and_stock() {
        let mut p = product("10", "0");
        assert!(p.validate().is_ok());

        p.set_stock(-1);
        assert!(matches!(p.validate(), Err(StockError::InvalidInput(_))));

        let p = product("-0.01", "0");
        assert!(matches!(p.validate(), Err(StockError::InvalidInput(_))));
    }

    #[test]
    fn serializes_four_scalar_fields() {
        let p = product("10", "50");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["code"], "P");
        assert_eq!(json["cost"], "10");
        assert_eq!(json["margin"], "50");
        assert_eq!(json["stock"], 0);
    }
}
