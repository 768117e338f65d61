//! Stage sequencing for the commercial document timeline.

use chrono::NaiveDate;
use domain::models::{
    document::{CommercialFlow, DocumentKind, DocumentRef, ReceiptRef},
    status::{InvoiceStatus, PurchaseOrderStatus, QuotationStatus, parse_status},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use ts_rs::TS;
use uuid::Uuid;

use super::badge::{self, BadgeCategory};

/// Derived render state of one stage in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageState {
    Completed,
    Current,
    Pending,
    Disabled,
}

/// Renderable document snapshot for one stage. `amount` is populated only
/// for the receipt stage.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct StageDocument {
    pub id: Uuid,
    pub number: String,
    pub issued_on: NaiveDate,
    pub status: String,
    pub badge: BadgeCategory,
    #[ts(as = "Option<String>")]
    pub amount: Option<Decimal>,
}

/// One stage of the timeline as consumed by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct StageView {
    pub kind: DocumentKind,
    pub state: StageState,
    pub document: Option<StageDocument>,
}

/// Compute the state of all four stages for one commercial flow.
///
/// With a current stage given, stages before it are completed only if their
/// record exists (a missing earlier record models a broken chain and stays
/// disabled), the current stage always renders as current, and later stages
/// are disabled regardless of data. Without one, a stage is completed when
/// its record exists with a terminal-success status, the first absent stage
/// is pending, and everything else is disabled.
pub fn sequence(flow: &CommercialFlow, current: Option<DocumentKind>) -> [StageView; 4] {
    DocumentKind::ORDERED.map(|kind| StageView {
        kind,
        state: stage_state(flow, kind, current),
        document: stage_document(flow, kind),
    })
}

fn stage_state(
    flow: &CommercialFlow,
    kind: DocumentKind,
    current: Option<DocumentKind>,
) -> StageState {
    match current {
        Some(cur) => {
            if kind.position() == cur.position() {
                StageState::Current
            } else if kind.position() > cur.position() {
                StageState::Disabled
            } else if flow.has_document(kind) {
                StageState::Completed
            } else {
                StageState::Disabled
            }
        }
        None => context_free_state(flow, kind),
    }
}

fn context_free_state(flow: &CommercialFlow, kind: DocumentKind) -> StageState {
    if flow.has_document(kind) {
        if is_terminal_success(flow, kind) {
            StageState::Completed
        } else {
            StageState::Disabled
        }
    } else if first_absent_stage(flow) == Some(kind) {
        StageState::Pending
    } else {
        StageState::Disabled
    }
}

fn first_absent_stage(flow: &CommercialFlow) -> Option<DocumentKind> {
    DocumentKind::ORDERED
        .into_iter()
        .find(|kind| !flow.has_document(*kind))
}

fn is_terminal_success(flow: &CommercialFlow, kind: DocumentKind) -> bool {
    match kind {
        DocumentKind::Quotation => flow.quotation.as_ref().is_some_and(|doc| {
            parse_status::<QuotationStatus>(&doc.status)
                .is_some_and(|status| status.is_terminal_success())
        }),
        DocumentKind::PurchaseOrder => flow.purchase_order.as_ref().is_some_and(|doc| {
            parse_status::<PurchaseOrderStatus>(&doc.status)
                .is_some_and(|status| status.is_terminal_success())
        }),
        DocumentKind::Invoice => flow.invoice.as_ref().is_some_and(|doc| {
            parse_status::<InvoiceStatus>(&doc.status)
                .is_some_and(|status| status.is_terminal_success())
        }),
        // A receipt closes its stage by existing at all.
        DocumentKind::Receipt => !flow.receipts.is_empty(),
    }
}

fn stage_document(flow: &CommercialFlow, kind: DocumentKind) -> Option<StageDocument> {
    match kind {
        DocumentKind::Receipt => flow.latest_receipt().map(receipt_document),
        _ => flow.document(kind).map(|doc| plain_document(kind, doc)),
    }
}

fn plain_document(kind: DocumentKind, doc: &DocumentRef) -> StageDocument {
    StageDocument {
        id: doc.id,
        number: doc.number.clone(),
        issued_on: doc.issued_on,
        status: doc.status.clone(),
        badge: badge::classify(kind, &doc.status),
        amount: None,
    }
}

fn receipt_document(receipt: &ReceiptRef) -> StageDocument {
    StageDocument {
        id: receipt.id,
        number: receipt.number.clone(),
        issued_on: receipt.issued_on,
        status: receipt.status.clone(),
        badge: badge::classify(DocumentKind::Receipt, &receipt.status),
        amount: Some(receipt.amount),
    }
}
