use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockbook_core::ProductCode;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_product).get(list_products))
        .route("/:code", get(get_product).delete(remove_product))
}

pub async fn register_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterProductRequest>,
) -> axum::response::Response {
    let cmd = match body.into_command() {
        Ok(c) => c,
        Err(e) => return errors::stock_error_to_response(e),
    };

    match services.stockbook.register_product(cmd) {
        Ok(product) => (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.stockbook.products() {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let code = match ProductCode::parse(&code) {
        Ok(c) => c,
        Err(e) => return errors::stock_error_to_response(e),
    };

    match services.stockbook.product(&code) {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("product {code} not found"),
        ),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let code = match ProductCode::parse(&code) {
        Ok(c) => c,
        Err(e) => return errors::stock_error_to_response(e),
    };

    match services.stockbook.remove_product(&code) {
        Ok(removed) => (StatusCode::OK, Json(dto::product_to_json(&removed))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
