//! Seat record model
//!
//! A seat is identified by `(centre, table, seat)` and toggles between
//! exactly two states. Records are never deleted; release resets them to
//! Available. Timestamps are Unix millis (storage and wire alike).

use super::FoodCentre;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Seat lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
}

/// State of a single seat
///
/// Invariant: `status = Available` ⇔ `booked_by`, `booked_at` and
/// `expires_at` are all `None`; when booked, `expires_at > booked_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub status: SeatStatus,
    pub booked_by: Option<String>,
    pub booked_at: Option<i64>,
    pub expires_at: Option<i64>,
}

impl SeatRecord {
    /// A fresh, available seat
    pub fn available() -> Self {
        Self {
            status: SeatStatus::Available,
            booked_by: None,
            booked_at: None,
            expires_at: None,
        }
    }

    /// A seat booked by `user_id` from `booked_at` until `expires_at`
    pub fn booked(user_id: impl Into<String>, booked_at: i64, expires_at: i64) -> Self {
        Self {
            status: SeatStatus::Booked,
            booked_by: Some(user_id.into()),
            booked_at: Some(booked_at),
            expires_at: Some(expires_at),
        }
    }

    pub fn is_booked(&self) -> bool {
        self.status == SeatStatus::Booked
    }

    /// Whether the booking has lapsed at `now_ms` (available seats never expire)
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.is_booked() && self.expires_at.is_some_and(|e| e < now_ms)
    }

    /// Booked and not yet expired at `now_ms`
    pub fn is_active(&self, now_ms: i64) -> bool {
        self.is_booked() && self.expires_at.is_some_and(|e| e > now_ms)
    }

    /// Check the state-field coupling invariant
    pub fn invariants_hold(&self) -> bool {
        match self.status {
            SeatStatus::Available => {
                self.booked_by.is_none() && self.booked_at.is_none() && self.expires_at.is_none()
            }
            SeatStatus::Booked => match (self.booked_by.as_ref(), self.booked_at, self.expires_at)
            {
                (Some(_), Some(at), Some(exp)) => exp > at,
                _ => false,
            },
        }
    }
}

impl Default for SeatRecord {
    fn default() -> Self {
        Self::available()
    }
}

/// Identity of a single seat: `(centre, table, seat)`, both numbers 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatKey {
    pub centre: FoodCentre,
    pub table: u32,
    pub seat: u32,
}

impl SeatKey {
    pub fn new(centre: FoodCentre, table: u32, seat: u32) -> Self {
        Self { centre, table, seat }
    }

    /// Storage document key: `{centre}_{table}_{seat}`
    pub fn doc_id(&self) -> String {
        format!("{}_{}_{}", self.centre.code(), self.table, self.seat)
    }

    /// Whether this key falls inside its centre's fixed layout
    pub fn in_layout(&self) -> bool {
        self.centre.contains(self.table, self.seat)
    }
}

impl fmt::Display for SeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc_id())
    }
}

/// Full seat map for one centre: table → seat → record
pub type CentreSeats = BTreeMap<u32, BTreeMap<u32, SeatRecord>>;

/// Availability summary for one centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCounts {
    pub total: u32,
    pub booked: u32,
    pub available: u32,
}

impl SeatCounts {
    /// Derive counts by scanning a centre's seat map
    pub fn from_seats(seats: &CentreSeats) -> Self {
        let mut total = 0;
        let mut booked = 0;
        for row in seats.values() {
            for record in row.values() {
                total += 1;
                if record.is_booked() {
                    booked += 1;
                }
            }
        }
        Self {
            total,
            booked,
            available: total - booked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_record_upholds_invariant() {
        let record = SeatRecord::available();
        assert_eq!(record.status, SeatStatus::Available);
        assert!(record.booked_by.is_none());
        assert!(record.booked_at.is_none());
        assert!(record.expires_at.is_none());
        assert!(record.invariants_hold());
    }

    #[test]
    fn test_booked_record_upholds_invariant() {
        let record = SeatRecord::booked("u1", 1_000, 61_000);
        assert!(record.is_booked());
        assert_eq!(record.booked_by.as_deref(), Some("u1"));
        assert!(record.invariants_hold());
    }

    #[test]
    fn test_invariant_violations_detected() {
        let mut record = SeatRecord::available();
        record.booked_by = Some("u1".to_string());
        assert!(!record.invariants_hold());

        // Booked but expiry not after booking time
        let record = SeatRecord::booked("u1", 61_000, 61_000);
        assert!(!record.invariants_hold());
    }

    #[test]
    fn test_expiry_predicates() {
        let record = SeatRecord::booked("u1", 1_000, 61_000);
        assert!(record.is_active(30_000));
        assert!(!record.is_expired(30_000));
        assert!(record.is_expired(61_001));
        assert!(!record.is_active(61_001));
        // Exact boundary: neither active nor expired
        assert!(!record.is_active(61_000));
        assert!(!record.is_expired(61_000));

        assert!(!SeatRecord::available().is_expired(i64::MAX));
    }

    #[test]
    fn test_doc_id_format() {
        let key = SeatKey::new(FoodCentre::Maxwell, 1, 12);
        assert_eq!(key.doc_id(), "maxwell_1_12");

        let key = SeatKey::new(FoodCentre::ChangiVillage, 6, 10);
        assert_eq!(key.doc_id(), "changiVillage_6_10");
    }

    #[test]
    fn test_in_layout() {
        assert!(SeatKey::new(FoodCentre::Maxwell, 6, 12).in_layout());
        assert!(!SeatKey::new(FoodCentre::Maxwell, 7, 1).in_layout());
        assert!(!SeatKey::new(FoodCentre::Newton, 1, 11).in_layout());
    }

    #[test]
    fn test_record_wire_format() {
        let record = SeatRecord::booked("user123", 1_000, 61_000);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "booked");
        assert_eq!(json["bookedBy"], "user123");
        assert_eq!(json["bookedAt"], 1_000);
        assert_eq!(json["expiresAt"], 61_000);

        let json = serde_json::to_value(SeatRecord::available()).unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["bookedBy"], serde_json::Value::Null);
    }

    #[test]
    fn test_counts_from_seats() {
        let mut seats = CentreSeats::new();
        seats
            .entry(1)
            .or_default()
            .insert(1, SeatRecord::booked("u1", 0, 60_000));
        seats.entry(1).or_default().insert(2, SeatRecord::available());
        seats.entry(2).or_default().insert(1, SeatRecord::available());

        let counts = SeatCounts::from_seats(&seats);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.booked, 1);
        assert_eq!(counts.available, 2);
    }
}
