use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/balance", get(balance))
        .route("/sales", get(sales_by_product))
}

pub async fn balance(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.stockbook.balance() {
        Ok(b) => (StatusCode::OK, Json(dto::balance_to_json(&b))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Units sold per product, best sellers first.
pub async fn sales_by_product(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.stockbook.sales_by_product() {
        Ok(sales) => {
            let items = sales.ranked().iter().map(dto::sales_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
