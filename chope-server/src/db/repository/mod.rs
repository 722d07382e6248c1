//! Seat Repository Module
//!
//! Storage backends for the seat store. The [`SeatStore`] trait is the
//! single seam between business logic and persistence; the backend is
//! selected once at construction time:
//!
//! - [`SurrealSeatStore`] — primary document database (embedded SurrealDB)
//! - [`LocalSeatStore`] — local fallback cache (redb file)
//!
//! Booking is an atomic conditional write inside the backend
//! (check-and-set on the seat status), never read-then-write in callers.

pub mod local;
pub mod surreal;

pub use local::LocalSeatStore;
pub use surreal::SurrealSeatStore;

use async_trait::async_trait;
use shared::{AppError, CentreSeats, FoodCentre, SeatKey, SeatRecord};
use thiserror::Error;

/// Storage-layer error types
///
/// Business outcomes (seat taken, nothing to release) are **not** errors;
/// they are values. Everything here is an infrastructure fault the caller
/// may retry or surface as "try again".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage operation timed out after {0}ms")]
    Timeout(u64),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => {
                AppError::with_message(shared::ErrorCode::TimeoutError, err.to_string())
            }
            StoreError::Serialization(_) => AppError::with_message(
                shared::ErrorCode::StorageCorrupted,
                err.to_string(),
            ),
            _ => AppError::storage_unavailable(err.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a booking attempt
///
/// `Taken` is the normal conflict result for a seat that is already booked
/// and not expired — callers re-render availability, nothing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookOutcome {
    /// The seat was booked; carries the stored record
    Booked(SeatRecord),
    /// The seat is held by a live, non-expired booking
    Taken,
}

/// Durable, consistent storage of seat state — the single source of truth
///
/// Implementations must guarantee:
/// - `book_seat` is an atomic check-and-set: of any number of concurrent
///   calls for the same free seat, exactly one returns [`BookOutcome::Booked`].
/// - `release_seat` is unconditional and idempotent.
/// - `ensure_initialized` never overwrites an existing record.
#[async_trait]
pub trait SeatStore: Send + Sync {
    /// Backend name for logs and health reporting
    fn backend(&self) -> &'static str;

    /// Seed every `(table, seat)` pair of the centre as Available.
    ///
    /// Idempotent: seats that already exist are left untouched, so a
    /// double initialization can never reset a live booking.
    async fn ensure_initialized(&self, centre: FoodCentre) -> StoreResult<()>;

    /// Read a single seat record
    async fn get_seat(&self, key: &SeatKey) -> StoreResult<Option<SeatRecord>>;

    /// Full table → seat → record map for a centre.
    ///
    /// Lazily initializes an empty centre, so callers never observe an
    /// uninitialized one.
    async fn list_seats(&self, centre: FoodCentre) -> StoreResult<CentreSeats>;

    /// Atomically book a seat.
    ///
    /// Succeeds iff the seat is Available, or Booked with
    /// `expires_at < booked_at` (an expired booking that the sweeper has
    /// not reclaimed yet). A live booking yields [`BookOutcome::Taken`].
    async fn book_seat(
        &self,
        key: &SeatKey,
        user_id: &str,
        booked_at: i64,
        expires_at: i64,
    ) -> StoreResult<BookOutcome>;

    /// Unconditionally reset a seat to Available.
    ///
    /// Releasing an already-available (or never-seeded) seat is a no-op
    /// success. Ownership checks belong to the caller.
    async fn release_seat(&self, key: &SeatKey) -> StoreResult<()>;
}
