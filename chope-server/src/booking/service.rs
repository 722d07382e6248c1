//! Booking Service
//!
//! Single entry point for seat mutation. The raw store release path is
//! never exposed to callers: cancellation always goes through the
//! ownership gate here.

use crate::db::repository::{BookOutcome, SeatStore};
use crate::policy::{self, ReservationInput};
use serde::Serialize;
use shared::{AppError, AppResult, CentreSeats, ErrorCode, FoodCentre, SeatCounts, SeatKey};
use std::str::FromStr;
use std::sync::Arc;

/// Successful booking result returned to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    /// Reservation reference for receipts and support requests
    pub reservation_ref: String,
    pub food_centre: FoodCentre,
    pub table_number: u32,
    pub seat_number: u32,
    pub booked_by: String,
    pub booked_at: i64,
    pub expires_at: i64,
    /// Applied duration in minutes
    pub duration: i64,
}

/// Seat booking, cancellation and read projections over a [`SeatStore`]
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn SeatStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn SeatStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SeatStore> {
        &self.store
    }

    /// Book a seat: validate → per-user limit → atomic store write.
    ///
    /// A seat that is already held returns a [`ErrorCode::SeatTaken`]
    /// failure ("Seat is no longer available"); only storage faults
    /// surface as system errors.
    pub async fn book(&self, input: &ReservationInput) -> AppResult<BookingConfirmation> {
        let outcome = policy::validate_reservation(input);
        if !outcome.valid {
            return Err(AppError::validation_errors(outcome.errors));
        }

        let (user_id, key) = typed_request(input)?;

        // Authoritative per-user limit; the policy constant shown to
        // clients is advisory only
        let active = self.active_bookings_for(&user_id).await?;
        if active.len() >= policy::MAX_ACTIVE_RESERVATIONS {
            return Err(AppError::with_message(
                ErrorCode::ActiveReservationLimit,
                format!(
                    "Maximum {} active reservations per user",
                    policy::MAX_ACTIVE_RESERVATIONS
                ),
            ));
        }

        let duration = policy::effective_duration(input.duration);
        let booked_at = shared::util::now_millis();
        let expires_at = booked_at + shared::util::minutes_to_millis(duration);

        match self
            .store
            .book_seat(&key, &user_id, booked_at, expires_at)
            .await?
        {
            BookOutcome::Booked(record) => {
                tracing::info!(seat = %key, user = %user_id, duration, "Seat booked");
                Ok(BookingConfirmation {
                    reservation_ref: format!("RSV-{}", shared::util::snowflake_id()),
                    food_centre: key.centre,
                    table_number: key.table,
                    seat_number: key.seat,
                    booked_by: user_id,
                    booked_at: record.booked_at.unwrap_or(booked_at),
                    expires_at: record.expires_at.unwrap_or(expires_at),
                    duration,
                })
            }
            BookOutcome::Taken => Err(AppError::seat_taken()),
        }
    }

    /// Cancel a booking on behalf of `user_id`.
    ///
    /// The only authorization gate in the subsystem: a booked seat is
    /// released only when `booked_by` matches. Cancelling a seat that is
    /// already available (or was never seeded) is a no-op success.
    pub async fn cancel(&self, user_id: &str, key: &SeatKey) -> AppResult<()> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("Valid userId is required"));
        }
        if !key.in_layout() {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("Seat {} is outside the centre layout", key),
            ));
        }

        match self.store.get_seat(key).await? {
            None => Ok(()),
            Some(record) if !record.is_booked() => Ok(()),
            Some(record) => {
                if record.booked_by.as_deref() == Some(user_id) {
                    self.store.release_seat(key).await?;
                    tracing::info!(seat = %key, user = %user_id, "Booking cancelled");
                    Ok(())
                } else {
                    tracing::warn!(
                        seat = %key,
                        user = %user_id,
                        "Cancellation denied: booking belongs to another user"
                    );
                    Err(AppError::not_booking_owner())
                }
            }
        }
    }

    /// Full seat map for a centre (lazy-initialized by the store)
    pub async fn list_seats(&self, centre: FoodCentre) -> AppResult<CentreSeats> {
        Ok(self.store.list_seats(centre).await?)
    }

    /// Availability summary derived by scanning the seat map
    pub async fn seat_counts(&self, centre: FoodCentre) -> AppResult<SeatCounts> {
        let seats = self.list_seats(centre).await?;
        Ok(SeatCounts::from_seats(&seats))
    }
}

/// Re-extract the typed request fields after shape validation
fn typed_request(input: &ReservationInput) -> AppResult<(String, SeatKey)> {
    let user_id = input
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("Valid userId is required"))?
        .to_string();

    let centre = FoodCentre::from_str(input.food_centre.as_deref().map(str::trim).unwrap_or(""))
        .map_err(|e| AppError::validation(e.to_string()))?;

    let table = input
        .table_number
        .and_then(|t| u32::try_from(t).ok())
        .filter(|t| *t >= 1)
        .ok_or_else(|| AppError::validation("Valid tableNumber is required"))?;

    let seat = input
        .seat_number
        .and_then(|s| u32::try_from(s).ok())
        .filter(|s| *s >= 1)
        .ok_or_else(|| AppError::validation("Valid seatNumber is required"))?;

    Ok((user_id, SeatKey::new(centre, table, seat)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::SurrealSeatStore;
    use shared::SeatStatus;
    use std::time::Duration;
    use surrealdb::Surreal;
    use surrealdb::engine::local::Mem;

    async fn service() -> BookingService {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("seats").await.unwrap();
        let store = SurrealSeatStore::new(db, Duration::from_secs(5));
        BookingService::new(Arc::new(store))
    }

    fn request(user: &str, centre: &str, table: i64, seat: i64) -> ReservationInput {
        ReservationInput {
            user_id: Some(user.to_string()),
            food_centre: Some(centre.to_string()),
            table_number: Some(table),
            seat_number: Some(seat),
            duration: Some(60),
        }
    }

    #[tokio::test]
    async fn test_book_applies_duration_exactly() {
        let service = service().await;
        let confirmation = service.book(&request("u1", "maxwell", 1, 1)).await.unwrap();

        assert_eq!(confirmation.duration, 60);
        assert_eq!(
            confirmation.expires_at - confirmation.booked_at,
            60 * 60_000
        );
        assert!(confirmation.reservation_ref.starts_with("RSV-"));
    }

    #[tokio::test]
    async fn test_book_conflict_surfaces_seat_taken() {
        let service = service().await;
        service.book(&request("u1", "maxwell", 1, 1)).await.unwrap();

        let err = service
            .book(&request("u2", "maxwell", 1, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SeatTaken);
        assert_eq!(err.message, "Seat is no longer available");
    }

    #[tokio::test]
    async fn test_book_invalid_input_collects_errors() {
        let service = service().await;
        let err = service.book(&ReservationInput::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_active_reservation_limit_enforced() {
        let service = service().await;
        service.book(&request("u1", "maxwell", 1, 1)).await.unwrap();
        service.book(&request("u1", "maxwell", 1, 2)).await.unwrap();
        service.book(&request("u1", "maxwell", 2, 1)).await.unwrap();

        let err = service
            .book(&request("u1", "maxwell", 2, 2))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ActiveReservationLimit);

        // A different user is unaffected
        service.book(&request("u2", "maxwell", 2, 2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_requires_ownership() {
        let service = service().await;
        service.book(&request("u1", "maxwell", 1, 1)).await.unwrap();

        let key = SeatKey::new(FoodCentre::Maxwell, 1, 1);
        let err = service.cancel("u2", &key).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotBookingOwner);

        // Denied cancellation leaves the seat booked by the owner
        let record = service.store().get_seat(&key).await.unwrap().unwrap();
        assert_eq!(record.status, SeatStatus::Booked);
        assert_eq!(record.booked_by.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_cancel_by_owner_releases_seat() {
        let service = service().await;
        service.book(&request("u1", "maxwell", 1, 1)).await.unwrap();

        let key = SeatKey::new(FoodCentre::Maxwell, 1, 1);
        service.cancel("u1", &key).await.unwrap();

        let record = service.store().get_seat(&key).await.unwrap().unwrap();
        assert_eq!(record.status, SeatStatus::Available);
        assert!(record.invariants_hold());
    }

    #[tokio::test]
    async fn test_cancel_available_seat_is_noop_success() {
        let service = service().await;
        service
            .store()
            .ensure_initialized(FoodCentre::Maxwell)
            .await
            .unwrap();

        let key = SeatKey::new(FoodCentre::Maxwell, 3, 3);
        service.cancel("u1", &key).await.unwrap();

        // Never-seeded centre behaves the same
        let key = SeatKey::new(FoodCentre::Newton, 1, 1);
        service.cancel("u1", &key).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_out_of_layout_rejected() {
        let service = service().await;
        let key = SeatKey::new(FoodCentre::Maxwell, 7, 1);
        let err = service.cancel("u1", &key).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[tokio::test]
    async fn test_seat_counts() {
        let service = service().await;
        service.book(&request("u1", "newton", 1, 1)).await.unwrap();

        let counts = service.seat_counts(FoodCentre::Newton).await.unwrap();
        assert_eq!(counts.total, 50);
        assert_eq!(counts.booked, 1);
        assert_eq!(counts.available, 49);
    }
}
