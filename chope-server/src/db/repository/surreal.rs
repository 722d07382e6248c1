//! Primary seat store backed by embedded SurrealDB
//!
//! One document per seat in the `seat` table, keyed by
//! `{centre}_{table}_{seat}`. Booking is a single conditional `UPDATE …
//! WHERE` statement, so the status check and the write are one atomic
//! step. The write path is additionally serialized through an async mutex:
//! the embedded engine reports optimistic write-write conflicts as errors,
//! and seat mutation has a single logical owner per request anyway.

use super::{BookOutcome, SeatStore, StoreError, StoreResult};
use crate::db::models::SeatDoc;
use async_trait::async_trait;
use serde::Deserialize;
use shared::{CentreSeats, FoodCentre, SeatKey, SeatRecord};
use std::time::Duration;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

const TABLE: &str = "seat";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

/// Seat store over the embedded document database
pub struct SurrealSeatStore {
    db: Surreal<Db>,
    write_lock: Mutex<()>,
    timeout: Duration,
}

impl SurrealSeatStore {
    pub fn new(db: Surreal<Db>, timeout: Duration) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
            timeout,
        }
    }

    /// Run a storage future under the configured timeout.
    ///
    /// Storage calls must never hang the caller; an elapsed timeout
    /// surfaces as a retriable [`StoreError::Timeout`].
    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    fn thing(key: &SeatKey) -> RecordId {
        RecordId::from_table_key(TABLE, key.doc_id())
    }

    /// Whether any seat document exists for the centre
    async fn centre_seeded(&self, centre: FoodCentre) -> StoreResult<bool> {
        let mut response = self
            .db
            .query("SELECT count() AS count FROM seat WHERE centre = $centre GROUP ALL")
            .bind(("centre", centre))
            .await?;
        let rows: Vec<CountRow> = response.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0) > 0)
    }

    /// Seed every seat of the centre as Available.
    ///
    /// Uses create-if-absent per document: an existing record makes the
    /// create fail, leaving live bookings untouched even when two seeding
    /// passes race each other.
    async fn seed_centre(&self, centre: FoodCentre) -> StoreResult<()> {
        for table in 1..=centre.table_count() {
            for seat in 1..=centre.seats_per_table() {
                let key = SeatKey::new(centre, table, seat);
                let doc = SeatDoc::available(&key);
                let created: Result<Option<SeatDoc>, surrealdb::Error> = self
                    .db
                    .create((TABLE, key.doc_id()))
                    .content(doc)
                    .await;
                if let Err(e) = created {
                    // Distinguish "already exists" from a real storage fault
                    let existing: Option<SeatDoc> =
                        self.db.select((TABLE, key.doc_id())).await?;
                    if existing.is_none() {
                        return Err(e.into());
                    }
                }
            }
        }
        tracing::debug!(centre = %centre, "Seeded seat documents");
        Ok(())
    }

    /// Conditional booking write; returns the updated document on success
    async fn try_book(
        &self,
        key: &SeatKey,
        user_id: &str,
        booked_at: i64,
        expires_at: i64,
    ) -> StoreResult<Option<SeatDoc>> {
        let mut response = self
            .db
            .query(
                "UPDATE $thing SET status = 'booked', bookedBy = $user, bookedAt = $at, expiresAt = $exp \
                 WHERE status = 'available' OR (status = 'booked' AND expiresAt < $at) \
                 RETURN AFTER",
            )
            .bind(("thing", Self::thing(key)))
            .bind(("user", user_id.to_string()))
            .bind(("at", booked_at))
            .bind(("exp", expires_at))
            .await?;
        let rows: Vec<SeatDoc> = response.take(0)?;
        Ok(rows.into_iter().next())
    }

    async fn select_centre(&self, centre: FoodCentre) -> StoreResult<Vec<SeatDoc>> {
        let mut response = self
            .db
            .query("SELECT * FROM seat WHERE centre = $centre")
            .bind(("centre", centre))
            .await?;
        let docs: Vec<SeatDoc> = response.take(0)?;
        Ok(docs)
    }
}

#[async_trait]
impl SeatStore for SurrealSeatStore {
    fn backend(&self) -> &'static str {
        "surreal"
    }

    async fn ensure_initialized(&self, centre: FoodCentre) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.with_timeout(async {
            if self.centre_seeded(centre).await? {
                return Ok(());
            }
            self.seed_centre(centre).await
        })
        .await
    }

    async fn get_seat(&self, key: &SeatKey) -> StoreResult<Option<SeatRecord>> {
        self.with_timeout(async {
            let doc: Option<SeatDoc> = self.db.select((TABLE, key.doc_id())).await?;
            Ok(doc.map(|d| d.record()))
        })
        .await
    }

    async fn list_seats(&self, centre: FoodCentre) -> StoreResult<CentreSeats> {
        self.with_timeout(async {
            let mut docs = self.select_centre(centre).await?;
            if docs.is_empty() {
                // Lazy initialization: first reader seeds the centre
                {
                    let _guard = self.write_lock.lock().await;
                    self.seed_centre(centre).await?;
                }
                docs = self.select_centre(centre).await?;
            }

            let mut seats = CentreSeats::new();
            for doc in docs {
                seats
                    .entry(doc.table)
                    .or_default()
                    .insert(doc.seat, doc.record());
            }
            Ok(seats)
        })
        .await
    }

    async fn book_seat(
        &self,
        key: &SeatKey,
        user_id: &str,
        booked_at: i64,
        expires_at: i64,
    ) -> StoreResult<BookOutcome> {
        let _guard = self.write_lock.lock().await;
        self.with_timeout(async {
            if let Some(doc) = self.try_book(key, user_id, booked_at, expires_at).await? {
                return Ok(BookOutcome::Booked(doc.record()));
            }

            // Empty result: the seat is either held or was never seeded
            let existing: Option<SeatDoc> = self.db.select((TABLE, key.doc_id())).await?;
            if existing.is_some() {
                return Ok(BookOutcome::Taken);
            }

            self.seed_centre(key.centre).await?;
            match self.try_book(key, user_id, booked_at, expires_at).await? {
                Some(doc) => Ok(BookOutcome::Booked(doc.record())),
                None => Ok(BookOutcome::Taken),
            }
        })
        .await
    }

    async fn release_seat(&self, key: &SeatKey) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.with_timeout(async {
            self.db
                .query(
                    "UPDATE $thing SET status = 'available', \
                     bookedBy = NONE, bookedAt = NONE, expiresAt = NONE",
                )
                .bind(("thing", Self::thing(key)))
                .await?
                .check()?;
            Ok(())
        })
        .await
    }
}
