use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockbook_core::StockError;
use stockbook_infra::ServiceError;

pub fn stock_error_to_response(err: StockError) -> axum::response::Response {
    let status = match &err {
        StockError::DuplicateCode(_) => StatusCode::CONFLICT,
        StockError::NotFound(_) | StockError::UnknownProduct(_) => StatusCode::NOT_FOUND,
        StockError::InvalidQuantity(_) | StockError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StockError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_error(status, err.kind(), err.to_string())
}

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => stock_error_to_response(e),
        ServiceError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
        ServiceError::Poisoned => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "stock book unavailable",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
