use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::DomainError;

/// Document type within the commercial flow.
///
/// The chain order is fixed: quotation, purchase order, invoice, receipt.
/// `position` is total over the variants, so extending the chain is a
/// compile-time change rather than a string-matching edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentKind {
    Quotation,
    PurchaseOrder,
    Invoice,
    Receipt,
}

impl DocumentKind {
    /// Stage order of the commercial flow.
    pub const ORDERED: [DocumentKind; 4] = [
        DocumentKind::Quotation,
        DocumentKind::PurchaseOrder,
        DocumentKind::Invoice,
        DocumentKind::Receipt,
    ];

    pub fn position(&self) -> usize {
        match self {
            DocumentKind::Quotation => 0,
            DocumentKind::PurchaseOrder => 1,
            DocumentKind::Invoice => 2,
            DocumentKind::Receipt => 3,
        }
    }
}

/// Immutable snapshot of one document in a commercial flow.
///
/// The raw status string is kept verbatim; presentation derives a badge
/// from it but always displays the original value alongside.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DocumentRef {
    pub id: Uuid,
    pub number: String,
    pub issued_on: NaiveDate,
    pub status: String,
}

/// Receipt snapshot. Receipts carry an amount; the other stages display
/// only number, date and status.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ReceiptRef {
    pub id: Uuid,
    pub number: String,
    pub issued_on: NaiveDate,
    pub status: String,
    #[ts(as = "String")]
    pub amount: Decimal,
}

/// All documents belonging to one commercial transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CommercialFlow {
    pub quotation: Option<DocumentRef>,
    pub purchase_order: Option<DocumentRef>,
    pub invoice: Option<DocumentRef>,
    pub receipts: Vec<ReceiptRef>,
}

impl CommercialFlow {
    /// Whether any record exists for the given stage. A dangling reference
    /// (document pointing at a record that never resolved) shows up here as
    /// absence, not as an error.
    pub fn has_document(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Quotation => self.quotation.is_some(),
            DocumentKind::PurchaseOrder => self.purchase_order.is_some(),
            DocumentKind::Invoice => self.invoice.is_some(),
            DocumentKind::Receipt => !self.receipts.is_empty(),
        }
    }

    pub fn document(&self, kind: DocumentKind) -> Option<&DocumentRef> {
        match kind {
            DocumentKind::Quotation => self.quotation.as_ref(),
            DocumentKind::PurchaseOrder => self.purchase_order.as_ref(),
            DocumentKind::Invoice => self.invoice.as_ref(),
            DocumentKind::Receipt => None,
        }
    }

    /// The most recent receipt by issue date.
    pub fn latest_receipt(&self) -> Option<&ReceiptRef> {
        self.receipts.iter().max_by_key(|r| r.issued_on)
    }
}

/// An issued invoice with its payment context, as consumed by the
/// notification feed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct OpenInvoice {
    pub invoice: DocumentRef,
    pub due_on: NaiveDate,
    #[ts(as = "String")]
    pub total: Decimal,
    pub receipts: Vec<ReceiptRef>,
}

/// Untyped document snapshot as posted by the UI layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct RawDocument {
    pub id: Option<Uuid>,
    pub number: Option<String>,
    pub issued_on: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct RawReceipt {
    pub id: Option<Uuid>,
    pub number: Option<String>,
    pub issued_on: Option<String>,
    pub status: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct RawFlow {
    pub quotation: Option<RawDocument>,
    pub purchase_order: Option<RawDocument>,
    pub invoice: Option<RawDocument>,
    #[serde(default)]
    pub receipts: Vec<RawReceipt>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct RawOpenInvoice {
    pub invoice: Option<RawDocument>,
    pub due_on: Option<String>,
    pub total: Option<String>,
    #[serde(default)]
    pub receipts: Vec<RawReceipt>,
}

impl TryFrom<RawDocument> for DocumentRef {
    type Error = DomainError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(DomainError::MissingField("id"))?;
        let number = raw.number.ok_or(DomainError::MissingField("number"))?;
        let issued_on = parse_iso_date(
            raw.issued_on
                .as_deref()
                .ok_or(DomainError::MissingField("issued_on"))?,
        )?;
        let status = raw.status.ok_or(DomainError::MissingField("status"))?;
        Ok(Self {
            id,
            number,
            issued_on,
            status,
        })
    }
}

impl TryFrom<RawReceipt> for ReceiptRef {
    type Error = DomainError;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(DomainError::MissingField("id"))?;
        let number = raw.number.ok_or(DomainError::MissingField("number"))?;
        let issued_on = parse_iso_date(
            raw.issued_on
                .as_deref()
                .ok_or(DomainError::MissingField("issued_on"))?,
        )?;
        let status = raw.status.ok_or(DomainError::MissingField("status"))?;
        let amount = parse_amount(
            raw.amount
                .as_deref()
                .ok_or(DomainError::MissingField("amount"))?,
        )?;
        Ok(Self {
            id,
            number,
            issued_on,
            status,
            amount,
        })
    }
}

impl TryFrom<RawFlow> for CommercialFlow {
    type Error = DomainError;

    fn try_from(raw: RawFlow) -> Result<Self, Self::Error> {
        Ok(Self {
            quotation: raw.quotation.map(DocumentRef::try_from).transpose()?,
            purchase_order: raw.purchase_order.map(DocumentRef::try_from).transpose()?,
            invoice: raw.invoice.map(DocumentRef::try_from).transpose()?,
            receipts: raw
                .receipts
                .into_iter()
                .map(ReceiptRef::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<RawOpenInvoice> for OpenInvoice {
    type Error = DomainError;

    fn try_from(raw: RawOpenInvoice) -> Result<Self, Self::Error> {
        let invoice = raw
            .invoice
            .ok_or(DomainError::MissingField("invoice"))
            .and_then(DocumentRef::try_from)?;
        let due_on = parse_iso_date(
            raw.due_on
                .as_deref()
                .ok_or(DomainError::MissingField("due_on"))?,
        )?;
        let total = parse_amount(
            raw.total
                .as_deref()
                .ok_or(DomainError::MissingField("total"))?,
        )?;
        Ok(Self {
            invoice,
            due_on,
            total,
            receipts: raw
                .receipts
                .into_iter()
                .map(ReceiptRef::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Parse an ISO `YYYY-MM-DD` calendar date, failing fast on anything else.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        DomainError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

/// Parse a decimal amount, failing fast on anything unparseable.
pub fn parse_amount(value: &str) -> Result<Decimal, DomainError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| DomainError::InvalidAmount(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_document() -> RawDocument {
        RawDocument {
            id: Some(Uuid::new_v4()),
            number: Some("QUO-0042".to_string()),
            issued_on: Some("2025-03-14".to_string()),
            status: Some("accepted".to_string()),
        }
    }

    #[test]
    fn test_document_validation_accepts_complete_record() {
        let doc = DocumentRef::try_from(raw_document()).unwrap();
        assert_eq!(doc.number, "QUO-0042");
        assert_eq!(doc.issued_on, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(doc.status, "accepted");
    }

    #[test]
    fn test_document_validation_rejects_missing_id() {
        let raw = RawDocument {
            id: None,
            ..raw_document()
        };
        let err = DocumentRef::try_from(raw).unwrap_err();
        assert!(matches!(err, DomainError::MissingField("id")));
    }

    #[test]
    fn test_document_validation_rejects_malformed_date() {
        let raw = RawDocument {
            issued_on: Some("14/03/2025".to_string()),
            ..raw_document()
        };
        let err = DocumentRef::try_from(raw).unwrap_err();
        match err {
            DomainError::InvalidDate { value, .. } => assert_eq!(value, "14/03/2025"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_receipt_validation_rejects_bad_amount() {
        let raw = RawReceipt {
            id: Some(Uuid::new_v4()),
            number: Some("RCT-0007".to_string()),
            issued_on: Some("2025-04-01".to_string()),
            status: Some("completed".to_string()),
            amount: Some("twelve".to_string()),
        };
        let err = ReceiptRef::try_from(raw).unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(v) if v == "twelve"));
    }

    #[test]
    fn test_latest_receipt_picks_most_recent_issue_date() {
        let receipt = |day: u32, number: &str| ReceiptRef {
            id: Uuid::new_v4(),
            number: number.to_string(),
            issued_on: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
            status: "completed".to_string(),
            amount: Decimal::from(100),
        };
        let flow = CommercialFlow {
            receipts: vec![receipt(2, "RCT-1"), receipt(9, "RCT-3"), receipt(5, "RCT-2")],
            ..CommercialFlow::default()
        };
        assert_eq!(flow.latest_receipt().unwrap().number, "RCT-3");
    }

    #[test]
    fn test_document_kind_positions_follow_chain_order() {
        let positions: Vec<usize> = DocumentKind::ORDERED.iter().map(|k| k.position()).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_raw_flow_deserializes_with_missing_sections() {
        let flow: RawFlow = serde_json::from_str(r#"{"quotation": {"number": "QUO-1"}}"#).unwrap();
        assert!(flow.purchase_order.is_none());
        assert!(flow.receipts.is_empty());
    }
}
