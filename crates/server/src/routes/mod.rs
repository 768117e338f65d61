pub mod alerts;
pub mod flows;
pub mod invoices;
pub mod notifications;

use axum::{Router, response::Json as ResponseJson, routing::get};
use utils::response::ApiResponse;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(flows::router())
        .merge(invoices::router())
        .merge(alerts::router())
        .merge(notifications::router())
}

async fn health() -> ResponseJson<ApiResponse<&'static str>> {
    ResponseJson(ApiResponse::success("ok"))
}
