use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use stockbook_catalog::{Product, RegisterProduct};
use stockbook_core::{ProductCode, StockError, StockResult};
use stockbook_infra::MovementOrder;
use stockbook_ledger::{Balance, Movement, MovementKind, ProductSales, RecordMovement};

// -------------------------
// Request DTOs
// -------------------------

/// A form value that may arrive as a JSON number or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterProductRequest {
    pub code: String,
    pub cost: Scalar,
    pub margin: Scalar,
    pub stock: Scalar,
}

impl RegisterProductRequest {
    pub fn into_command(self) -> StockResult<RegisterProduct> {
        RegisterProduct::parse(
            &self.code,
            &self.cost.as_text(),
            &self.margin.as_text(),
            &self.stock.as_text(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordMovementRequest {
    pub product_code: String,
    pub kind: String,
    pub quantity: Scalar,
}

impl RecordMovementRequest {
    pub fn into_command(self) -> StockResult<RecordMovement> {
        let code = ProductCode::parse(&self.product_code)?;
        let kind: MovementKind = self.kind.parse()?;
        let raw = self.quantity.as_text();
        let quantity = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| StockError::invalid_input(format!("quantity {raw:?}: {e}")))?;
        Ok(RecordMovement::now(code, kind, quantity))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovementsQuery {
    pub order: Option<String>,
}

impl MovementsQuery {
    pub fn order(&self) -> StockResult<MovementOrder> {
        match self.order.as_deref().map(str::trim) {
            None | Some("") | Some("chronological") => Ok(MovementOrder::Chronological),
            Some("recent") => Ok(MovementOrder::Recent),
            Some(other) => Err(StockError::invalid_input(format!(
                "order must be one of: chronological, recent (got {other:?})"
            ))),
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

/// Money and percentages go out as decimal strings without trailing zeros.
fn decimal(d: Decimal) -> String {
    d.normalize().to_string()
}

/// Derived figures the domain could not compute go out as `null`.
fn derived(d: StockResult<Decimal>) -> Option<String> {
    d.ok().map(decimal)
}

pub fn product_to_json(p: &Product) -> Value {
    json!({
        "code": p.code().as_str(),
        "cost": decimal(p.cost()),
        "margin": decimal(p.margin()),
        "sell_price": derived(p.sell_price()),
        "stock": p.stock(),
    })
}

pub fn movement_to_json(m: &Movement) -> Value {
    json!({
        "id": m.id().to_string(),
        "occurred_at": m.occurred_at().to_rfc3339(),
        "product_code": m.product_code().as_str(),
        "kind": m.kind().as_str(),
        "quantity": m.quantity(),
        "unit_price": decimal(m.unit_price()),
        "amount": derived(m.amount()),
    })
}

pub fn balance_to_json(b: &Balance) -> Value {
    json!({
        "total_purchases": decimal(b.total_purchases),
        "total_sales": decimal(b.total_sales),
        "net": decimal(b.net),
        "positive": b.is_positive(),
    })
}

pub fn sales_to_json(s: &ProductSales) -> Value {
    json!({
        "code": s.code.as_str(),
        "quantity_sold": s.quantity_sold,
        "listed": s.listed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_accepts_numbers_and_strings() {
        let body: RegisterProductRequest = serde_json::from_value(json!({
            "code": "WIDGET", "cost": 10, "margin": "12.5", "stock": "5"
        }))
        .unwrap();
        let cmd = body.into_command().unwrap();
        assert_eq!(cmd.cost, Decimal::from(10));
        assert_eq!(cmd.margin, Decimal::new(125, 1));
        assert_eq!(cmd.stock, 5);
    }

    #[test]
    fn fractional_stock_is_invalid_input() {
        let body: RegisterProductRequest = serde_json::from_value(json!({
            "code": "WIDGET", "cost": 10, "margin": 50, "stock": 2.5
        }))
        .unwrap();
        assert!(matches!(body.into_command(), Err(StockError::InvalidInput(_))));
    }

    #[test]
    fn movement_request_parses_kind_and_quantity() {
        let body: RecordMovementRequest = serde_json::from_value(json!({
            "product_code": "WIDGET", "kind": "Sale", "quantity": 3
        }))
        .unwrap();
        let cmd = body.into_command().unwrap();
        assert_eq!(cmd.kind, MovementKind::Sale);
        assert_eq!(cmd.quantity, 3);

        let body: RecordMovementRequest = serde_json::from_value(json!({
            "product_code": "WIDGET", "kind": "sale", "quantity": "three"
        }))
        .unwrap();
        assert!(matches!(body.into_command(), Err(StockError::InvalidInput(_))));
    }

    #[test]
    fn movements_query_order() {
        let q = MovementsQuery { order: None };
        assert_eq!(q.order().unwrap(), MovementOrder::Chronological);
        let q = MovementsQuery { order: Some("recent".into()) };
        assert_eq!(q.order().unwrap(), MovementOrder::Recent);
        let q = MovementsQuery { order: Some("random".into()) };
        assert!(q.order().is_err());
    }

    #[test]
    fn product_json_carries_derived_sell_price() {
        let mut catalog = stockbook_catalog::Catalog::new();
        let product = catalog
            .register(RegisterProduct::parse("WIDGET", "10", "50", "5").unwrap())
            .unwrap();
        let v = product_to_json(&product);
        assert_eq!(v["sell_price"], "15");
        assert_eq!(v["stock"], 5);
    }
}
