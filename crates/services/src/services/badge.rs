//! Maps raw document status strings to presentation badge categories.

use domain::models::{
    document::DocumentKind,
    status::{InvoiceStatus, PurchaseOrderStatus, QuotationStatus, ReceiptStatus, parse_status},
};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;
use ts_rs::TS;

/// Presentation bucket for a status badge. Distinct from the raw status
/// string, which is always displayed verbatim next to the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeCategory {
    Success,
    Default,
    Warning,
    Destructive,
    Secondary,
}

/// Classify a raw status string for a document type.
///
/// Total over any input: statuses outside the known vocabulary fall back to
/// `Secondary`, so a new or typo'd status degrades in the UI instead of
/// breaking a list render.
pub fn classify(kind: DocumentKind, raw_status: &str) -> BadgeCategory {
    let known = match kind {
        DocumentKind::Quotation => {
            parse_status::<QuotationStatus>(raw_status).map(|status| match status {
                QuotationStatus::Accepted => BadgeCategory::Success,
                QuotationStatus::Sent => BadgeCategory::Default,
                QuotationStatus::Draft => BadgeCategory::Secondary,
                QuotationStatus::Expired => BadgeCategory::Warning,
                QuotationStatus::Rejected => BadgeCategory::Destructive,
            })
        }
        DocumentKind::PurchaseOrder => {
            parse_status::<PurchaseOrderStatus>(raw_status).map(|status| match status {
                PurchaseOrderStatus::Approved
                | PurchaseOrderStatus::Received
                | PurchaseOrderStatus::Completed => BadgeCategory::Success,
                PurchaseOrderStatus::Pending => BadgeCategory::Warning,
                PurchaseOrderStatus::Draft => BadgeCategory::Secondary,
                PurchaseOrderStatus::Cancelled => BadgeCategory::Destructive,
            })
        }
        DocumentKind::Invoice => {
            parse_status::<InvoiceStatus>(raw_status).map(|status| match status {
                InvoiceStatus::Paid => BadgeCategory::Success,
                InvoiceStatus::Sent => BadgeCategory::Default,
                InvoiceStatus::PartiallyPaid => BadgeCategory::Warning,
                InvoiceStatus::Overdue => BadgeCategory::Destructive,
                InvoiceStatus::Draft | InvoiceStatus::Cancelled => BadgeCategory::Secondary,
            })
        }
        DocumentKind::Receipt => {
            parse_status::<ReceiptStatus>(raw_status).map(|status| match status {
                ReceiptStatus::Completed => BadgeCategory::Success,
                ReceiptStatus::Cancelled => BadgeCategory::Destructive,
            })
        }
    };

    known.unwrap_or_else(|| {
        debug!(
            kind = %kind,
            status = raw_status,
            "unknown document status, falling back to secondary badge"
        );
        BadgeCategory::Secondary
    })
}
