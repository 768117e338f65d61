//! Payment reconciliation against an invoice total.

use axum::{Router, response::Json as ResponseJson, routing::post};
use domain::{
    DomainError,
    models::document::{RawReceipt, ReceiptRef, parse_amount},
};
use serde::{Deserialize, Serialize};
use services::services::payment::{PaymentSummary, reconcile};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ReconcileRequest {
    pub total: Option<String>,
    #[serde(default)]
    pub receipts: Vec<RawReceipt>,
}

/// POST /api/invoices/reconcile
/// Compute paid-to-date and outstanding balance for an invoice.
pub async fn reconcile_invoice(
    axum::Json(payload): axum::Json<ReconcileRequest>,
) -> Result<ResponseJson<ApiResponse<PaymentSummary>>, ApiError> {
    let total = parse_amount(
        payload
            .total
            .as_deref()
            .ok_or(DomainError::MissingField("total"))?,
    )?;
    let receipts: Vec<ReceiptRef> = payload
        .receipts
        .into_iter()
        .map(ReceiptRef::try_from)
        .collect::<Result<_, _>>()?;
    Ok(ResponseJson(ApiResponse::success(reconcile(
        total, &receipts,
    ))))
}

pub fn router() -> Router {
    Router::new().nest(
        "/invoices",
        Router::new().route("/reconcile", post(reconcile_invoice)),
    )
}
