use axum::Router;

pub mod movements;
pub mod products;
pub mod reports;
pub mod system;

/// Router for every stock book endpoint (everything except `/health`).
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/movements", movements::router())
        .nest("/reports", reports::router())
}
