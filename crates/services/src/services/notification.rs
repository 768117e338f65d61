//! Notification feed derivation with explicit read state.
//!
//! Read state is a plain value handed in and out of the derivation;
//! persistence goes through an injected store, so the feed is testable
//! without a browser and holds no hidden global state.

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use domain::models::{document::OpenInvoice, residence::ResidencePermit};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;

use super::expiry::{ExpirySeverity, expiry_alert};
use super::payment::reconcile;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("read-state store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    ResidenceExpiry,
    InvoiceOverdue,
}

/// One entry of the notification feed. `id` is deterministic per source
/// record so acknowledgements survive re-derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub occurred_on: NaiveDate,
    pub severity: ExpirySeverity,
    pub read: bool,
}

/// Set of acknowledged notification ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ReadState {
    acknowledged: BTreeSet<String>,
}

impl ReadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            acknowledged: ids.into_iter().collect(),
        }
    }

    pub fn is_acknowledged(&self, id: &str) -> bool {
        self.acknowledged.contains(id)
    }

    /// Grow the set. Acknowledging an already-acknowledged id is a no-op.
    pub fn acknowledge(mut self, ids: &[String]) -> Self {
        self.acknowledged.extend(ids.iter().cloned());
        self
    }

    pub fn len(&self) -> usize {
        self.acknowledged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acknowledged.is_empty()
    }
}

/// Persistence seam for the read state. The embedding layer decides where
/// acknowledged ids live; the derivation never touches storage itself.
pub trait ReadStateStore {
    fn load(&self) -> anyhow::Result<ReadState>;
    fn save(&self, state: &ReadState) -> anyhow::Result<()>;
}

/// Store backed by process memory, for tests and embedding without any
/// durable storage.
#[derive(Debug, Default)]
pub struct InMemoryReadStateStore {
    state: Mutex<ReadState>,
}

impl ReadStateStore for InMemoryReadStateStore {
    fn load(&self) -> anyhow::Result<ReadState> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("read-state lock poisoned"))?;
        Ok(state.clone())
    }

    fn save(&self, state: &ReadState) -> anyhow::Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("read-state lock poisoned"))?;
        *guard = state.clone();
        Ok(())
    }
}

/// Derive the notification feed for one day.
///
/// One entry per residence permit inside the warning window or past expiry,
/// one per open invoice past its due date that is not settled. Ordered by
/// severity, then date, then id, so the feed is stable across calls.
pub fn derive_notifications(
    today: NaiveDate,
    residences: &[ResidencePermit],
    open_invoices: &[OpenInvoice],
    read_state: &ReadState,
) -> Vec<Notification> {
    let mut notifications = Vec::new();

    for permit in residences {
        let alert = expiry_alert(permit.expires_on, today);
        if alert.severity == ExpirySeverity::Ok {
            continue;
        }
        let id = format!("residence-{}", permit.employee_id);
        let message = if alert.days_remaining < 0 {
            format!(
                "Residence permit for {} expired {} day(s) ago",
                permit.employee_name, -alert.days_remaining
            )
        } else {
            format!(
                "Residence permit for {} expires in {} day(s)",
                permit.employee_name, alert.days_remaining
            )
        };
        notifications.push(Notification {
            read: read_state.is_acknowledged(&id),
            id,
            kind: NotificationKind::ResidenceExpiry,
            message,
            occurred_on: permit.expires_on,
            severity: alert.severity,
        });
    }

    for open in open_invoices {
        if open.due_on >= today {
            continue;
        }
        let summary = reconcile(open.total, &open.receipts);
        if summary.is_settled {
            continue;
        }
        let id = format!("invoice-{}", open.invoice.id);
        notifications.push(Notification {
            read: read_state.is_acknowledged(&id),
            id,
            kind: NotificationKind::InvoiceOverdue,
            message: format!(
                "Invoice {} is overdue with {} outstanding",
                open.invoice.number, summary.outstanding
            ),
            occurred_on: open.due_on,
            severity: expiry_alert(open.due_on, today).severity,
        });
    }

    notifications.sort_by(|a, b| {
        (a.severity, a.occurred_on, &a.id).cmp(&(b.severity, b.occurred_on, &b.id))
    });
    notifications
}

/// Feed derivation bound to a read-state store.
pub struct NotificationService<S: ReadStateStore> {
    store: S,
}

impl<S: ReadStateStore> NotificationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current feed with read flags applied from the stored state.
    pub fn feed(
        &self,
        today: NaiveDate,
        residences: &[ResidencePermit],
        open_invoices: &[OpenInvoice],
    ) -> Result<Vec<Notification>, NotificationError> {
        let read_state = self.store.load()?;
        Ok(derive_notifications(
            today,
            residences,
            open_invoices,
            &read_state,
        ))
    }

    /// Acknowledge ids and persist the grown state.
    pub fn acknowledge(&self, ids: &[String]) -> Result<ReadState, NotificationError> {
        let state = self.store.load()?.acknowledge(ids);
        self.store.save(&state)?;
        info!(acknowledged = ids.len(), "notification read-state updated");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use domain::models::document::DocumentRef;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    fn permit(name: &str, days_out: i64) -> ResidencePermit {
        ResidencePermit {
            employee_id: Uuid::new_v4(),
            employee_name: name.to_string(),
            expires_on: today() + Duration::days(days_out),
        }
    }

    fn overdue_invoice(number: &str, total: i64) -> OpenInvoice {
        OpenInvoice {
            invoice: DocumentRef {
                id: Uuid::new_v4(),
                number: number.to_string(),
                issued_on: today() - Duration::days(40),
                status: "overdue".to_string(),
            },
            due_on: today() - Duration::days(10),
            total: Decimal::from(total),
            receipts: vec![],
        }
    }

    #[test]
    fn test_permits_outside_warning_window_are_silent() {
        let feed = derive_notifications(
            today(),
            &[permit("Amira", 90)],
            &[],
            &ReadState::new(),
        );
        assert!(feed.is_empty());
    }

    #[test]
    fn test_expiring_permit_produces_notification() {
        let feed = derive_notifications(today(), &[permit("Amira", 5)], &[], &ReadState::new());
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, NotificationKind::ResidenceExpiry);
        assert_eq!(feed[0].severity, ExpirySeverity::Critical);
        assert!(feed[0].message.contains("expires in 5 day(s)"));
        assert!(!feed[0].read);
    }

    #[test]
    fn test_settled_overdue_invoice_is_silent() {
        let mut open = overdue_invoice("INV-9", 100);
        open.receipts = vec![domain::models::document::ReceiptRef {
            id: Uuid::new_v4(),
            number: "RCT-1".to_string(),
            issued_on: today(),
            status: "completed".to_string(),
            amount: Decimal::from(100),
        }];
        let feed = derive_notifications(today(), &[], &[open], &ReadState::new());
        assert!(feed.is_empty());
    }

    #[test]
    fn test_unsettled_overdue_invoice_produces_notification() {
        let feed = derive_notifications(
            today(),
            &[],
            &[overdue_invoice("INV-9", 100)],
            &ReadState::new(),
        );
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, NotificationKind::InvoiceOverdue);
        assert!(feed[0].message.contains("INV-9"));
        assert!(feed[0].message.contains("100 outstanding"));
    }

    #[test]
    fn test_feed_orders_most_severe_first() {
        let feed = derive_notifications(
            today(),
            &[permit("Warning", 20), permit("Expired", -3), permit("Critical", 2)],
            &[],
            &ReadState::new(),
        );
        let severities: Vec<ExpirySeverity> = feed.iter().map(|n| n.severity).collect();
        assert_eq!(
            severities,
            vec![
                ExpirySeverity::Expired,
                ExpirySeverity::Critical,
                ExpirySeverity::Warning,
            ]
        );
    }

    #[test]
    fn test_acknowledged_id_is_flagged_read() {
        let permits = [permit("Amira", 5)];
        let unread = derive_notifications(today(), &permits, &[], &ReadState::new());
        let read_state = ReadState::new().acknowledge(&[unread[0].id.clone()]);
        let feed = derive_notifications(today(), &permits, &[], &read_state);
        assert!(feed[0].read);
    }

    #[test]
    fn test_service_persists_acknowledgements() {
        let service = NotificationService::new(InMemoryReadStateStore::default());
        let permits = [permit("Amira", 3)];

        let first = service.feed(today(), &permits, &[]).unwrap();
        assert!(!first[0].read);

        service.acknowledge(&[first[0].id.clone()]).unwrap();
        let second = service.feed(today(), &permits, &[]).unwrap();
        assert!(second[0].read);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let id = "residence-1".to_string();
        let once = ReadState::new().acknowledge(std::slice::from_ref(&id));
        let twice = once.clone().acknowledge(std::slice::from_ref(&id));
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }
}
