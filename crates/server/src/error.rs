use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use utils::response::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Domain(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(status = %status, error = %self, "request rejected");
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
