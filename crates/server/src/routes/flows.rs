//! Timeline derivation for a commercial flow snapshot.

use axum::{Router, response::Json as ResponseJson, routing::post};
use domain::models::document::{CommercialFlow, DocumentKind, RawFlow};
use serde::{Deserialize, Serialize};
use services::services::flows::{FlowTimeline, derive_timeline};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TimelineRequest {
    pub flow: RawFlow,
    /// Document type the viewer is currently on, if any. Listings omit it.
    pub current: Option<DocumentKind>,
}

/// POST /api/flows/timeline
/// Derive stage states and the next action for one commercial flow.
pub async fn derive_flow_timeline(
    axum::Json(payload): axum::Json<TimelineRequest>,
) -> Result<ResponseJson<ApiResponse<FlowTimeline>>, ApiError> {
    let flow = CommercialFlow::try_from(payload.flow)?;
    let timeline = derive_timeline(&flow, payload.current);
    Ok(ResponseJson(ApiResponse::success(timeline)))
}

pub fn router() -> Router {
    Router::new().nest(
        "/flows",
        Router::new().route("/timeline", post(derive_flow_timeline)),
    )
}
