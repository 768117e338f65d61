use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Quotation lifecycle vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuotationStatus {
    /// Statuses that close the quotation stage out successfully.
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, QuotationStatus::Accepted | QuotationStatus::Sent)
    }
}

/// Purchase order lifecycle vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Draft,
    Pending,
    Approved,
    Received,
    Completed,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn is_terminal_success(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Approved
                | PurchaseOrderStatus::Received
                | PurchaseOrderStatus::Completed
        )
    }
}

/// Invoice lifecycle vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    PartiallyPaid,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }
}

/// Receipt lifecycle vocabulary. A receipt counts as terminal the moment it
/// exists; `Cancelled` only matters for payment reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReceiptStatus {
    Completed,
    Cancelled,
}

/// Parse a raw status string leniently. Unknown values yield `None` rather
/// than an error so new or typo'd statuses degrade instead of failing a
/// whole render.
pub fn parse_status<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().to_ascii_lowercase().parse::<T>().ok()
}
