use std::collections::HashMap;

use stockbook_core::{ProductCode, StockError, StockResult};

use crate::product::{Product, RegisterProduct};

/// The product set, keyed by code, in registration order.
///
/// Removing a product keeps the relative order of the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductCode, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a catalog from persisted products, keeping their order and
    /// their stored stock.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> StockResult<Self> {
        let mut catalog = Self::new();
        for product in products {
            product.validate()?;
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Register a new product.
    ///
    /// Fails with `DuplicateCode` if the code is taken and with `InvalidInput`
    /// for a negative cost or stock. A failed registration leaves the catalog
    /// untouched.
    pub fn register(&mut self, cmd: RegisterProduct) -> StockResult<Product> {
        let product = Product::from_command(cmd);
        product.validate()?;
        self.insert(product.clone())?;
        Ok(product)
    }

    pub fn get(&self, code: &ProductCode) -> Option<&Product> {
        self.index.get(code).map(|&i| &self.products[i])
    }

    pub fn contains(&self, code: &ProductCode) -> bool {
        self.index.contains_key(code)
    }

    /// Remove a product. Movements that name it are not touched.
    pub fn remove(&mut self, code: &ProductCode) -> StockResult<Product> {
        let position = self
            .index
            .remove(code)
            .ok_or_else(|| StockError::NotFound(code.clone()))?;

        let removed = self.products.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(removed)
    }

    /// All products in registration order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Shift a product's stock by `delta`.
    ///
    /// Reserved for `stockbook_ledger::Ledger::record`, which pairs every
    /// stock change with a recorded movement. Other callers must go through
    /// the ledger. The result may not go below zero.
    #[doc(hidden)]
    pub fn adjust_stock(&mut self, code: &ProductCode, delta: i64) -> StockResult<&Product> {
        let position = *self
            .index
            .get(code)
            .ok_or_else(|| StockError::UnknownProduct(code.clone()))?;

        let product = &mut self.products[position];
        let available = product.stock();
        let new_stock = available
            .checked_add(delta)
            .ok_or_else(|| StockError::invalid_input(format!("stock of {code} would overflow")))?;

        if new_stock < 0 {
            return Err(StockError::InsufficientStock {
                code: code.clone(),
                requested: delta.saturating_neg(),
                available,
            });
        }

        product.set_stock(new_stock);
        Ok(&*product)
    }

    fn insert(&mut self, product: Product) -> StockResult<()> {
        if self.index.contains_key(product.code()) {
            return Err(StockError::DuplicateCode(product.code().clone()));
        }
        self.index.insert(product.code().clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    fn register(
        catalog: &mut Catalog,
        c: &str,
        cost: &str,
        margin: &str,
        stock: &str,
    ) -> StockResult<Product> {
        catalog.register(RegisterProduct::parse(c, cost, margin, stock)?)
    }

    #[test]
    fn register_returns_the_new_product() {
        let mut catalog = Catalog::new();
        let p = register(&mut catalog, "WIDGET", "10", "50", "5").unwrap();

        assert_eq!(p.code(), &code("WIDGET"));
        assert_eq!(p.cost(), Decimal::from(10));
        assert_eq!(p.margin(), Decimal::from(50));
        assert_eq!(p.stock(), 5);
        assert_eq!(p.sell_price().unwrap(), Decimal::from(15));
        assert_eq!(catalog.get(&code("WIDGET")), Some(&p));
    }

    #[test]
    fn duplicate_code_is_rejected_without_mutation() {
        let mut catalog = Catalog::new();
        register(&mut catalog, "WIDGET", "10", "50", "5").unwrap();
        let before = catalog.clone();

        let err = register(&mut catalog, "WIDGET", "99", "1", "1").unwrap_err();

        assert_eq!(err, StockError::DuplicateCode(code("WIDGET")));
        assert_eq!(catalog, before);
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut catalog = Catalog::new();
        let err = register(&mut catalog, "WIDGET", "10", "50", "-1").unwrap_err();
        assert!(matches!(err, StockError::InvalidInput(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn unrepresentable_sell_price_is_rejected() {
        let mut catalog = Catalog::new();
        let max = Decimal::MAX.to_string();
        let err = register(&mut catalog, "BIG", &max, "100", "5").unwrap_err();
        assert!(matches!(err, StockError::InvalidInput(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn remove_missing_product_is_not_found() {
        let mut catalog = Catalog::new();
        let err = catalog.remove(&code("GHOST")).unwrap_err();
        assert_eq!(err, StockError::NotFound(code("GHOST")));
    }

    #[test]
    fn remove_keeps_order_and_lookups_of_remaining_products() {
        let mut catalog = Catalog::new();
        for c in ["A", "B", "C", "D"] {
            register(&mut catalog, c, "1", "0", "0").unwrap();
        }

        let removed = catalog.remove(&code("B")).unwrap();
        assert_eq!(removed.code(), &code("B"));

        let codes: Vec<_> = catalog.all().iter().map(|p| p.code().as_str()).collect();
        assert_eq!(codes, vec!["A", "C", "D"]);
        assert!(!catalog.contains(&code("B")));
        assert_eq!(catalog.get(&code("D")).unwrap().code(), &code("D"));

        // A removed code can be registered again.
        register(&mut catalog, "B", "2", "0", "0").unwrap();
        assert_eq!(catalog.all().last().unwrap().code(), &code("B"));
    }

    #[test]
    fn adjust_stock_refuses_to_go_negative() {
        let mut catalog = Catalog::new();
        register(&mut catalog, "WIDGET", "10", "50", "2").unwrap();

        let err = catalog.adjust_stock(&code("WIDGET"), -3).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                code: code("WIDGET"),
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(catalog.get(&code("WIDGET")).unwrap().stock(), 2);

        assert_eq!(catalog.adjust_stock(&code("WIDGET"), -2).unwrap().stock(), 0);
    }

    #[test]
    fn from_products_rejects_repeated_codes() {
        let mut source = Catalog::new();
        register(&mut source, "A", "1", "0", "3").unwrap();
        let a = source.get(&code("A")).unwrap().clone();

        let err = Catalog::from_products(vec![a.clone(), a]).unwrap_err();
        assert_eq!(err, StockError::DuplicateCode(code("A")));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: registering N distinct codes yields N products, each
        /// matching its arguments, with sell_price = cost * (1 + margin/100).
        #[test]
        fn distinct_registrations_are_all_kept(
            entries in prop::collection::btree_map(
                "[A-Z]{1,6}",
                (0i64..100_000, -100i64..500, 0i64..10_000),
                1..20,
            )
        ) {
            let mut catalog = Catalog::new();
            for (c, (cost_cents, margin, stock)) in &entries {
                let cost = Decimal::new(*cost_cents, 2);
                let margin = Decimal::from(*margin);
                let p = catalog
                    .register(RegisterProduct::new(code(c), cost, margin, *stock))
                    .unwrap();

                prop_assert_eq!(p.cost(), cost);
                prop_assert_eq!(p.margin(), margin);
                prop_assert_eq!(p.stock(), *stock);
                prop_assert_eq!(
                    p.sell_price().unwrap(),
                    cost * (Decimal::ONE + margin / Decimal::ONE_HUNDRED)
                );
            }
            prop_assert_eq!(catalog.len(), entries.len());
        }

        /// Property: a duplicate registration never changes the catalog.
        #[test]
        fn duplicate_registration_is_a_no_op(stock in 0i64..1000, other in 0i64..1000) {
            let mut catalog = Catalog::new();
            catalog
                .register(RegisterProduct::new(code("X"), Decimal::ONE, Decimal::ZERO, stock))
                .unwrap();
            let before = catalog.clone();

            let result = catalog.register(RegisterProduct::new(
                code("X"),
                Decimal::TEN,
                Decimal::ONE,
                other,
            ));

            prop_assert_eq!(result, Err(StockError::DuplicateCode(code("X"))));
            prop_assert_eq!(catalog, before);
        }
    }
}
