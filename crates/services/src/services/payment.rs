//! Invoice payment reconciliation.

use domain::models::{
    document::ReceiptRef,
    status::{ReceiptStatus, parse_status},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct PaymentSummary {
    #[ts(as = "String")]
    pub total: Decimal,
    #[ts(as = "String")]
    pub paid: Decimal,
    /// Goes negative on overpayment rather than clamping, so the excess
    /// stays visible.
    #[ts(as = "String")]
    pub outstanding: Decimal,
    pub is_settled: bool,
}

/// Sum non-cancelled receipts against the invoice total. A receipt with an
/// unknown status still counts as recorded money.
pub fn reconcile(invoice_total: Decimal, receipts: &[ReceiptRef]) -> PaymentSummary {
    let paid: Decimal = receipts
        .iter()
        .filter(|r| parse_status::<ReceiptStatus>(&r.status) != Some(ReceiptStatus::Cancelled))
        .map(|r| r.amount)
        .sum();
    let outstanding = invoice_total - paid;
    PaymentSummary {
        total: invoice_total,
        paid,
        outstanding,
        is_settled: outstanding <= Decimal::ZERO,
    }
}
