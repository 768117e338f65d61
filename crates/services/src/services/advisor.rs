//! Proposes the single next action for a commercial flow.

use domain::models::{
    document::CommercialFlow,
    status::{InvoiceStatus, QuotationStatus, ReceiptStatus, parse_status},
};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use ts_rs::TS;
use uuid::Uuid;

/// The action the UI should offer next, with the document it starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NextActionKind {
    CreatePurchaseOrder,
    CreateInvoice,
    RecordPayment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct NextAction {
    pub kind: NextActionKind,
    /// Document the creation route deep-links from, e.g.
    /// `/invoices/new?fromPO=<from_id>`.
    pub from_id: Uuid,
}

/// Greedy rule list, first match wins. Not a planner: no backtracking, and
/// one non-cancelled receipt suppresses the payment nudge for good, even if
/// the invoice remains partially paid.
pub fn next_action(flow: &CommercialFlow) -> Option<NextAction> {
    if let Some(quotation) = &flow.quotation {
        let accepted =
            parse_status::<QuotationStatus>(&quotation.status) == Some(QuotationStatus::Accepted);
        if accepted && flow.purchase_order.is_none() {
            return Some(NextAction {
                kind: NextActionKind::CreatePurchaseOrder,
                from_id: quotation.id,
            });
        }
    }

    if let Some(purchase_order) = &flow.purchase_order {
        if flow.invoice.is_none() {
            return Some(NextAction {
                kind: NextActionKind::CreateInvoice,
                from_id: purchase_order.id,
            });
        }
    }

    if let Some(invoice) = &flow.invoice {
        let paid = parse_status::<InvoiceStatus>(&invoice.status) == Some(InvoiceStatus::Paid);
        let has_recorded_payment = flow
            .receipts
            .iter()
            .any(|r| parse_status::<ReceiptStatus>(&r.status) != Some(ReceiptStatus::Cancelled));
        if !paid && !has_recorded_payment {
            return Some(NextAction {
                kind: NextActionKind::RecordPayment,
                from_id: invoice.id,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::models::document::{DocumentRef, ReceiptRef};
    use rust_decimal::Decimal;

    use super::*;

    fn document(status: &str) -> DocumentRef {
        DocumentRef {
            id: Uuid::new_v4(),
            number: "DOC-1".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            status: status.to_string(),
        }
    }

    fn receipt(status: &str) -> ReceiptRef {
        ReceiptRef {
            id: Uuid::new_v4(),
            number: "RCT-1".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            status: status.to_string(),
            amount: Decimal::from(50),
        }
    }

    #[test]
    fn test_accepted_quotation_suggests_purchase_order() {
        let quotation = document("accepted");
        let quotation_id = quotation.id;
        let flow = CommercialFlow {
            quotation: Some(quotation),
            ..CommercialFlow::default()
        };
        let action = next_action(&flow).unwrap();
        assert_eq!(action.kind, NextActionKind::CreatePurchaseOrder);
        assert_eq!(action.from_id, quotation_id);
    }

    #[test]
    fn test_unaccepted_quotation_suggests_nothing() {
        let flow = CommercialFlow {
            quotation: Some(document("sent")),
            ..CommercialFlow::default()
        };
        assert_eq!(next_action(&flow), None);
    }

    #[test]
    fn test_purchase_order_without_invoice_suggests_invoice() {
        let purchase_order = document("approved");
        let po_id = purchase_order.id;
        let flow = CommercialFlow {
            quotation: Some(document("accepted")),
            purchase_order: Some(purchase_order),
            ..CommercialFlow::default()
        };
        let action = next_action(&flow).unwrap();
        assert_eq!(action.kind, NextActionKind::CreateInvoice);
        assert_eq!(action.from_id, po_id);
    }

    #[test]
    fn test_unpaid_invoice_without_receipts_suggests_payment() {
        let invoice = document("sent");
        let invoice_id = invoice.id;
        let flow = CommercialFlow {
            quotation: Some(document("accepted")),
            purchase_order: Some(document("approved")),
            invoice: Some(invoice),
            receipts: vec![],
        };
        let action = next_action(&flow).unwrap();
        assert_eq!(action.kind, NextActionKind::RecordPayment);
        assert_eq!(action.from_id, invoice_id);
    }

    #[test]
    fn test_paid_invoice_suggests_nothing() {
        let flow = CommercialFlow {
            quotation: Some(document("accepted")),
            purchase_order: Some(document("approved")),
            invoice: Some(document("paid")),
            receipts: vec![],
        };
        assert_eq!(next_action(&flow), None);
    }

    #[test]
    fn test_recorded_payment_suppresses_nudge() {
        let flow = CommercialFlow {
            quotation: Some(document("accepted")),
            purchase_order: Some(document("approved")),
            invoice: Some(document("partially_paid")),
            receipts: vec![receipt("completed")],
        };
        assert_eq!(next_action(&flow), None);
    }

    #[test]
    fn test_cancelled_receipt_does_not_suppress_nudge() {
        let flow = CommercialFlow {
            quotation: Some(document("accepted")),
            purchase_order: Some(document("approved")),
            invoice: Some(document("sent")),
            receipts: vec![receipt("cancelled")],
        };
        assert_eq!(
            next_action(&flow).map(|a| a.kind),
            Some(NextActionKind::RecordPayment)
        );
    }
}
