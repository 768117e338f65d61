use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::document::parse_iso_date;
use crate::error::DomainError;

/// Residence permit record for an employee, as surfaced by the expiring
/// residences view and the notification feed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ResidencePermit {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub expires_on: NaiveDate,
}

/// Untyped residence permit snapshot as posted by the UI layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct RawResidencePermit {
    pub employee_id: Option<Uuid>,
    pub employee_name: Option<String>,
    pub expires_on: Option<String>,
}

impl TryFrom<RawResidencePermit> for ResidencePermit {
    type Error = DomainError;

    fn try_from(raw: RawResidencePermit) -> Result<Self, Self::Error> {
        let employee_id = raw
            .employee_id
            .ok_or(DomainError::MissingField("employee_id"))?;
        let employee_name = raw
            .employee_name
            .ok_or(DomainError::MissingField("employee_name"))?;
        let expires_on = parse_iso_date(
            raw.expires_on
                .as_deref()
                .ok_or(DomainError::MissingField("expires_on"))?,
        )?;
        Ok(Self {
            employee_id,
            employee_name,
            expires_on,
        })
    }
}
