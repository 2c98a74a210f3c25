use stockbook_catalog::Catalog;
use stockbook_core::{ProductCode, StockError, StockResult};

use crate::movement::{Movement, MovementKind, RecordMovement};
use crate::report::{Balance, SalesByProduct};

/// Append-only record of movements, in the order they were recorded.
///
/// Running totals are kept alongside the movements and checked on every
/// append, so the derived figures are always representable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    movements: Vec<Movement>,
    totals: Balance,
    /// Units sold per code, in order of first sale.
    sold: Vec<(ProductCode, i64)>,
}

/// Figures after a pending append.
struct Tally {
    totals: Balance,
    sold: Option<i64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted movements.
    ///
    /// Catalog stock is not touched: persisted stock is authoritative.
    pub fn from_movements(movements: Vec<Movement>) -> StockResult<Self> {
        if let Some(bad) = movements.iter().find(|m| m.quantity() <= 0) {
            return Err(StockError::InvalidQuantity(bad.quantity()));
        }

        let mut ledger = Self::new();
        for movement in movements {
            let tally = ledger.tally(&movement)?;
            ledger.append(movement, tally);
        }
        Ok(ledger)
    }

    /// Validate a movement against the catalog, apply it to stock, and append
    /// it.
    ///
    /// Checks run in order: the product must exist, the quantity must be
    /// positive, and a sale may not exceed the stock on hand (selling exactly
    /// the stock on hand is allowed). A movement whose amount or running
    /// totals would leave the representable range is `InvalidInput`. Nothing
    /// is mutated unless every check passes.
    pub fn record(&mut self, catalog: &mut Catalog, cmd: RecordMovement) -> StockResult<Movement> {
        let product = catalog
            .get(&cmd.product_code)
            .ok_or_else(|| StockError::UnknownProduct(cmd.product_code.clone()))?;

        if cmd.quantity <= 0 {
            return Err(StockError::InvalidQuantity(cmd.quantity));
        }

        let (delta, unit_price) = match cmd.kind {
            MovementKind::Purchase => (cmd.quantity, product.cost()),
            MovementKind::Sale => {
                if cmd.quantity > product.stock() {
                    return Err(StockError::InsufficientStock {
                        code: cmd.product_code.clone(),
                        requested: cmd.quantity,
                        available: product.stock(),
                    });
                }
                (-cmd.quantity, product.sell_price()?)
            }
        };

        let movement = Movement::new(
            cmd.occurred_at,
            cmd.product_code,
            cmd.kind,
            cmd.quantity,
            unit_price,
        );
        let tally = self.tally(&movement)?;

        catalog.adjust_stock(movement.product_code(), delta)?;
        self.append(movement.clone(), tally);
        Ok(movement)
    }

    /// All movements, oldest first.
    pub fn all(&self) -> &[Movement] {
        &self.movements
    }

    /// All movements, most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &Movement> {
        self.movements.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Totals over every movement at its recorded unit price. Current catalog
    /// prices play no part.
    pub fn balance(&self) -> Balance {
        self.totals
    }

    /// Units sold per product.
    ///
    /// Every product currently in the catalog gets an entry (zero if never
    /// sold). Sales of products that have since been removed are kept as
    /// extra entries flagged `listed = false`.
    pub fn sales_by_product(&self, catalog: &Catalog) -> SalesByProduct {
        let mut sales = SalesByProduct::seed(catalog.all().iter().map(|p| p.code().clone()));
        for (code, units) in &self.sold {
            sales.set_sold(code, *units);
        }
        sales
    }

    fn sold_of(&self, code: &ProductCode) -> i64 {
        self.sold
            .iter()
            .find(|(c, _)| c == code)
            .map_or(0, |(_, units)| *units)
    }

    /// Running figures with `movement` included. Does not modify `self`.
    fn tally(&self, movement: &Movement) -> StockResult<Tally> {
        let totals = self.totals.checked_add(Balance::of(movement)?)?;
        let sold = match movement.kind() {
            MovementKind::Purchase => None,
            MovementKind::Sale => {
                let code = movement.product_code();
                let units = self
                    .sold_of(code)
                    .checked_add(movement.quantity())
                    .ok_or_else(|| {
                        StockError::invalid_input(format!(
                            "units sold of {code} would be out of range"
                        ))
                    })?;
                Some(units)
            }
        };
        Ok(Tally { totals, sold })
    }

    fn append(&mut self, movement: Movement, tally: Tally) {
        if let Some(units) = tally.sold {
            let code = movement.product_code();
            match self.sold.iter_mut().find(|(c, _)| c == code) {
                Some(entry) => entry.1 = units,
                None => self.sold.push((code.clone(), units)),
            }
        }
        self.totals = tally.totals;
        self.movements.push(movement);
    }
}
