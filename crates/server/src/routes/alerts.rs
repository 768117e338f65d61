//! Residence expiry alerting.

use axum::{Router, response::Json as ResponseJson, routing::post};
use chrono::Utc;
use domain::{
    DomainError,
    models::{
        document::parse_iso_date,
        residence::{RawResidencePermit, ResidencePermit},
    },
};
use serde::{Deserialize, Serialize};
use services::services::expiry::{ExpiryAlert, ResidenceExpiry, expiring_residences, expiry_alert};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ResidenceAlertRequest {
    pub expires_on: Option<String>,
    /// Reference date for the calculation; defaults to the server's current
    /// date. The derivation itself never reads a clock.
    pub today: Option<String>,
}

/// POST /api/alerts/residence
/// Bucket a residence expiry date into a severity.
pub async fn residence_alert(
    axum::Json(payload): axum::Json<ResidenceAlertRequest>,
) -> Result<ResponseJson<ApiResponse<ExpiryAlert>>, ApiError> {
    let expires_on = parse_iso_date(
        payload
            .expires_on
            .as_deref()
            .ok_or(DomainError::MissingField("expires_on"))?,
    )?;
    let today = match payload.today.as_deref() {
        Some(value) => parse_iso_date(value)?,
        None => Utc::now().date_naive(),
    };
    Ok(ResponseJson(ApiResponse::success(expiry_alert(
        expires_on, today,
    ))))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct ExpiringResidencesRequest {
    pub today: Option<String>,
    #[serde(default)]
    pub residences: Vec<RawResidencePermit>,
}

/// POST /api/alerts/residences
/// List permits inside the warning window or already expired.
pub async fn expiring_residences_view(
    axum::Json(payload): axum::Json<ExpiringResidencesRequest>,
) -> Result<ResponseJson<ApiResponse<Vec<ResidenceExpiry>>>, ApiError> {
    let today = match payload.today.as_deref() {
        Some(value) => parse_iso_date(value)?,
        None => Utc::now().date_naive(),
    };
    let permits: Vec<ResidencePermit> = payload
        .residences
        .into_iter()
        .map(ResidencePermit::try_from)
        .collect::<Result<_, _>>()?;
    Ok(ResponseJson(ApiResponse::success(expiring_residences(
        today, &permits,
    ))))
}

pub fn router() -> Router {
    Router::new().nest(
        "/alerts",
        Router::new()
            .route("/residence", post(residence_alert))
            .route("/residences", post(expiring_residences_view)),
    )
}
