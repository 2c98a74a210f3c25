use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(record_movement).get(list_movements))
}

pub async fn record_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RecordMovementRequest>,
) -> axum::response::Response {
    let cmd = match body.into_command() {
        Ok(c) => c,
        Err(e) => return errors::stock_error_to_response(e),
    };

    match services.stockbook.record_movement(cmd) {
        Ok(movement) => {
            (StatusCode::CREATED, Json(dto::movement_to_json(&movement))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `?order=recent` lists newest first; the default is chronological.
pub async fn list_movements(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::MovementsQuery>,
) -> axum::response::Response {
    let order = match query.order() {
        Ok(o) => o,
        Err(e) => return errors::stock_error_to_response(e),
    };

    match services.stockbook.movements(order) {
        Ok(movements) => {
            let items = movements.iter().map(dto::movement_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
