//! Days-remaining buckets for residence permit expiry.

use chrono::NaiveDate;
use domain::models::residence::ResidencePermit;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use ts_rs::TS;

/// Days at or under which an upcoming expiry is critical.
pub const CRITICAL_WINDOW_DAYS: i64 = 7;

/// Single warning window used everywhere a residence expiry is surfaced.
pub const WARNING_WINDOW_DAYS: i64 = 30;

/// Severity bucket for an expiry date. Variant order is severity order, so
/// feeds can sort on it directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpirySeverity {
    Expired,
    Critical,
    Warning,
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ExpiryAlert {
    /// Negative once the expiry date has passed.
    pub days_remaining: i64,
    pub severity: ExpirySeverity,
}

/// Bucket an expiry date relative to `today`. Calendar dates only, time of
/// day never enters the calculation.
pub fn expiry_alert(expires_on: NaiveDate, today: NaiveDate) -> ExpiryAlert {
    let days_remaining = (expires_on - today).num_days();
    let severity = if days_remaining < 0 {
        ExpirySeverity::Expired
    } else if days_remaining <= CRITICAL_WINDOW_DAYS {
        ExpirySeverity::Critical
    } else if days_remaining <= WARNING_WINDOW_DAYS {
        ExpirySeverity::Warning
    } else {
        ExpirySeverity::Ok
    };
    ExpiryAlert {
        days_remaining,
        severity,
    }
}

/// Row of the expiring-residences view.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ResidenceExpiry {
    pub permit: ResidencePermit,
    pub alert: ExpiryAlert,
}

/// Permits inside the warning window or already expired, most urgent first.
pub fn expiring_residences(today: NaiveDate, permits: &[ResidencePermit]) -> Vec<ResidenceExpiry> {
    let mut rows: Vec<ResidenceExpiry> = permits
        .iter()
        .map(|permit| ResidenceExpiry {
            permit: permit.clone(),
            alert: expiry_alert(permit.expires_on, today),
        })
        .filter(|row| row.alert.severity != ExpirySeverity::Ok)
        .collect();
    rows.sort_by_key(|row| row.alert.days_remaining);
    rows
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn alert_at(days: i64) -> ExpiryAlert {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        expiry_alert(today + chrono::Duration::days(days), today)
    }

    #[test]
    fn test_severity_threshold_boundaries() {
        assert_eq!(alert_at(-1).severity, ExpirySeverity::Expired);
        assert_eq!(alert_at(0).severity, ExpirySeverity::Critical);
        assert_eq!(alert_at(7).severity, ExpirySeverity::Critical);
        assert_eq!(alert_at(8).severity, ExpirySeverity::Warning);
        assert_eq!(alert_at(30).severity, ExpirySeverity::Warning);
        assert_eq!(alert_at(31).severity, ExpirySeverity::Ok);
    }

    #[test]
    fn test_days_remaining_can_be_negative() {
        assert_eq!(alert_at(-14).days_remaining, -14);
    }

    #[test]
    fn test_severity_orders_most_urgent_first() {
        assert!(ExpirySeverity::Expired < ExpirySeverity::Critical);
        assert!(ExpirySeverity::Critical < ExpirySeverity::Warning);
        assert!(ExpirySeverity::Warning < ExpirySeverity::Ok);
    }

    #[test]
    fn test_expiring_residences_filters_and_sorts() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let permit = |name: &str, days: i64| ResidencePermit {
            employee_id: Uuid::new_v4(),
            employee_name: name.to_string(),
            expires_on: today + chrono::Duration::days(days),
        };
        let permits = vec![
            permit("Safe", 120),
            permit("Soon", 12),
            permit("Gone", -4),
            permit("Now", 1),
        ];
        let rows = expiring_residences(today, &permits);
        let names: Vec<&str> = rows.iter().map(|r| r.permit.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Gone", "Now", "Soon"]);
    }
}
