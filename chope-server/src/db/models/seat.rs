//! Seat Document Model

use serde::{Deserialize, Serialize};
use shared::{FoodCentre, SeatKey, SeatRecord, SeatStatus};

/// Seat document as stored in the primary document database
///
/// One document per seat, keyed by `{centre}_{table}_{seat}`. The identity
/// fields are duplicated into the document so centre-wide scans can filter
/// on `centre` without parsing record IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDoc {
    pub centre: FoodCentre,
    pub table: u32,
    pub seat: u32,
    pub status: SeatStatus,
    #[serde(default)]
    pub booked_by: Option<String>,
    #[serde(default)]
    pub booked_at: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl SeatDoc {
    /// A fresh, available seat document for `key`
    pub fn available(key: &SeatKey) -> Self {
        Self {
            centre: key.centre,
            table: key.table,
            seat: key.seat,
            status: SeatStatus::Available,
            booked_by: None,
            booked_at: None,
            expires_at: None,
        }
    }

    /// Identity key of this document
    pub fn key(&self) -> SeatKey {
        SeatKey::new(self.centre, self.table, self.seat)
    }

    /// Project the document onto the domain record
    pub fn record(&self) -> SeatRecord {
        SeatRecord {
            status: self.status,
            booked_by: self.booked_by.clone(),
            booked_at: self.booked_at,
            expires_at: self.expires_at,
        }
    }
}
