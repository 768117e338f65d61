//! Notification feed derivation. Read state travels in the request; the
//! server persists nothing.

use axum::{Router, response::Json as ResponseJson, routing::post};
use chrono::Utc;
use domain::models::{
    document::{OpenInvoice, RawOpenInvoice, parse_iso_date},
    residence::{RawResidencePermit, ResidencePermit},
};
use serde::{Deserialize, Serialize};
use services::services::notification::{Notification, ReadState, derive_notifications};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct NotificationFeedRequest {
    pub today: Option<String>,
    #[serde(default)]
    pub residences: Vec<RawResidencePermit>,
    #[serde(default)]
    pub invoices: Vec<RawOpenInvoice>,
    /// Notification ids the viewer has already acknowledged.
    #[serde(default)]
    pub acknowledged: Vec<String>,
}

/// POST /api/notifications/feed
/// Derive the notification feed for the posted records.
pub async fn notification_feed(
    axum::Json(payload): axum::Json<NotificationFeedRequest>,
) -> Result<ResponseJson<ApiResponse<Vec<Notification>>>, ApiError> {
    let today = match payload.today.as_deref() {
        Some(value) => parse_iso_date(value)?,
        None => Utc::now().date_naive(),
    };
    let residences: Vec<ResidencePermit> = payload
        .residences
        .into_iter()
        .map(ResidencePermit::try_from)
        .collect::<Result<_, _>>()?;
    let invoices: Vec<OpenInvoice> = payload
        .invoices
        .into_iter()
        .map(OpenInvoice::try_from)
        .collect::<Result<_, _>>()?;
    let read_state = ReadState::from_ids(payload.acknowledged);

    let feed = derive_notifications(today, &residences, &invoices, &read_state);
    Ok(ResponseJson(ApiResponse::success(feed)))
}

pub fn router() -> Router {
    Router::new().nest(
        "/notifications",
        Router::new().route("/feed", post(notification_feed)),
    )
}
