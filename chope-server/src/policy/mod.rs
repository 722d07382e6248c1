//! Reservation Policy Engine
//!
//! Pure, stateless rule checking for reservations. Validation collects
//! *all* violations instead of short-circuiting — callers feed the full
//! list back into user-facing forms. The constants exposed by
//! [`policies()`] are advisory for client display; the authoritative
//! duration and per-user limit checks run server-side at booking time.

use serde::{Deserialize, Serialize};
use shared::FoodCentre;
use std::fmt;
use std::str::FromStr;

// ── Rule constants ──────────────────────────────────────────────────

/// Minimum booking duration (inclusive)
pub const MIN_DURATION_MINUTES: i64 = 30;
/// Maximum booking duration (inclusive)
pub const MAX_DURATION_MINUTES: i64 = 120;
/// Duration applied when the request does not specify one
pub const DEFAULT_DURATION_MINUTES: i64 = 60;
/// How far ahead a booking may be placed
pub const MAX_ADVANCE_BOOKING_DAYS: i64 = 7;
/// Bookings may be placed immediately
pub const MIN_ADVANCE_BOOKING_DAYS: i64 = 0;
/// Cancellations must happen at least this long before the reservation
pub const CANCELLATION_WINDOW_MINUTES: i64 = 15;
/// Maximum simultaneous active reservations per user
pub const MAX_ACTIVE_RESERVATIONS: usize = 3;

// ── Reservation validation ──────────────────────────────────────────

/// Raw reservation request as received from the client.
///
/// Every field is optional so that validation can report all missing or
/// malformed fields at once instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationInput {
    pub user_id: Option<String>,
    pub food_centre: Option<String>,
    pub table_number: Option<i64>,
    pub seat_number: Option<i64>,
    pub duration: Option<i64>,
}

/// Result of [`validate_reservation`]: valid iff `errors` is empty
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a reservation request against the rule set, collecting every
/// violation. Duration bounds are inclusive: exactly 30 or 120 minutes
/// is valid.
pub fn validate_reservation(input: &ReservationInput) -> ValidationOutcome {
    let mut errors = Vec::new();

    if input.user_id.as_deref().map(str::trim).unwrap_or("").is_empty() {
        errors.push("Valid userId is required".to_string());
    }

    let centre = match input.food_centre.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push("Valid foodCentre is required".to_string());
            None
        }
        Some(code) => match FoodCentre::from_str(code) {
            Ok(centre) => Some(centre),
            Err(_) => {
                errors.push(format!("Unknown foodCentre '{}'", code));
                None
            }
        },
    };

    let table = match input.table_number {
        Some(t) if t >= 1 => Some(t),
        _ => {
            errors.push("Valid tableNumber is required".to_string());
            None
        }
    };

    let seat = match input.seat_number {
        Some(s) if s >= 1 => Some(s),
        _ => {
            errors.push("Valid seatNumber is required".to_string());
            None
        }
    };

    if let (Some(centre), Some(table)) = (centre, table)
        && table > centre.table_count() as i64
    {
        errors.push(format!(
            "tableNumber {} is out of range for {} (1-{})",
            table,
            centre.code(),
            centre.table_count()
        ));
    }

    if let (Some(centre), Some(seat)) = (centre, seat)
        && seat > centre.seats_per_table() as i64
    {
        errors.push(format!(
            "seatNumber {} is out of range for {} (1-{})",
            seat,
            centre.code(),
            centre.seats_per_table()
        ));
    }

    if let Some(duration) = input.duration {
        if duration < MIN_DURATION_MINUTES {
            errors.push(format!(
                "Duration must be at least {} minutes",
                MIN_DURATION_MINUTES
            ));
        } else if duration > MAX_DURATION_MINUTES {
            errors.push(format!(
                "Duration cannot exceed {} minutes",
                MAX_DURATION_MINUTES
            ));
        }
    }

    ValidationOutcome {
        valid: errors.is_empty(),
        errors,
    }
}

/// Duration to apply for a request: the requested value, or the default
pub fn effective_duration(duration: Option<i64>) -> i64 {
    duration.unwrap_or(DEFAULT_DURATION_MINUTES)
}

// ── Cancellation validation ─────────────────────────────────────────

/// Raw cancellation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancellationInput {
    pub reservation_id: Option<String>,
    pub user_id: Option<String>,
    /// Start time of the reservation (Unix millis), if known
    pub reservation_time: Option<i64>,
}

/// Why a cancellation request was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationViolation {
    MissingReservationId,
    MissingUserId,
    WindowClosed,
}

impl fmt::Display for CancellationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReservationId => write!(f, "Reservation ID required"),
            Self::MissingUserId => write!(f, "User ID required"),
            Self::WindowClosed => write!(
                f,
                "Cannot cancel within {} minutes of reservation time",
                CANCELLATION_WINDOW_MINUTES
            ),
        }
    }
}

/// Check a cancellation request.
///
/// When `reservation_time` is supplied, the cancellation is rejected if it
/// falls inside the cancellation window before the reservation starts.
pub fn validate_cancellation(
    input: &CancellationInput,
    now_ms: i64,
) -> Result<(), CancellationViolation> {
    if input.reservation_id.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err(CancellationViolation::MissingReservationId);
    }

    if input.user_id.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err(CancellationViolation::MissingUserId);
    }

    if let Some(reservation_time) = input.reservation_time {
        let minutes_until = (reservation_time - now_ms) / 60_000;
        if minutes_until < CANCELLATION_WINDOW_MINUTES {
            return Err(CancellationViolation::WindowClosed);
        }
    }

    Ok(())
}

// ── Seat data validation ────────────────────────────────────────────

/// Raw seat-data payload (layout submissions from the client)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeatDataInput {
    pub food_centre: Option<String>,
    pub table_number: Option<i64>,
    pub seats: Option<serde_json::Value>,
}

/// Structural validation of a seat-data payload, collecting all violations
pub fn validate_seat_data(input: &SeatDataInput) -> ValidationOutcome {
    let mut errors = Vec::new();

    if input.food_centre.as_deref().map(str::trim).unwrap_or("").is_empty() {
        errors.push("Valid foodCentre is required".to_string());
    }

    if input.table_number.is_none() {
        errors.push("Valid tableNumber is required".to_string());
    }

    if !input.seats.as_ref().is_some_and(|s| s.is_array()) {
        errors.push("Seats must be an array".to_string());
    }

    ValidationOutcome {
        valid: errors.is_empty(),
        errors,
    }
}

// ── Policy display set ──────────────────────────────────────────────

/// Constant rule set exposed to clients for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySet {
    pub duration: DurationPolicy,
    pub booking: BookingPolicy,
    pub cancellation: CancellationPolicy,
    pub limits: LimitsPolicy,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationPolicy {
    pub min: i64,
    pub max: i64,
    #[serde(rename = "default")]
    pub default_minutes: i64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPolicy {
    pub max_advance_days: i64,
    pub min_advance_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationPolicy {
    pub window_minutes: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsPolicy {
    pub max_active_reservations: usize,
    pub description: String,
}

/// The constant rule set for client display
pub fn policies() -> PolicySet {
    PolicySet {
        duration: DurationPolicy {
            min: MIN_DURATION_MINUTES,
            max: MAX_DURATION_MINUTES,
            default_minutes: DEFAULT_DURATION_MINUTES,
            unit: "minutes",
        },
        booking: BookingPolicy {
            max_advance_days: MAX_ADVANCE_BOOKING_DAYS,
            min_advance_days: MIN_ADVANCE_BOOKING_DAYS,
        },
        cancellation: CancellationPolicy {
            window_minutes: CANCELLATION_WINDOW_MINUTES,
            description: format!(
                "Can cancel up to {} minutes before reservation",
                CANCELLATION_WINDOW_MINUTES
            ),
        },
        limits: LimitsPolicy {
            max_active_reservations: MAX_ACTIVE_RESERVATIONS,
            description: format!(
                "Maximum {} active reservations per user",
                MAX_ACTIVE_RESERVATIONS
            ),
        },
    }
}
