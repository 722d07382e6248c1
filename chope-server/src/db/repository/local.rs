//! Local fallback seat store backed by redb
//!
//! Used when the primary document store cannot be opened at startup. Keys
//! are `(centre, table, seat)` tuples, values are JSON-serialized
//! [`SeatRecord`]s. redb write transactions are single-writer, so the
//! check-and-set inside `book_seat` is atomic by construction.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns, the booking survives a crash, and the file is always left in a
//! consistent state (copy-on-write with atomic pointer swap).

use super::{BookOutcome, SeatStore, StoreResult};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::{CentreSeats, FoodCentre, SeatKey, SeatRecord};
use std::path::Path;
use std::sync::Arc;

/// Seat table: key = (centre code, table, seat), value = JSON SeatRecord
const SEATS_TABLE: TableDefinition<(&str, u32, u32), &[u8]> = TableDefinition::new("seats");

/// Seat store over a local redb file
#[derive(Clone)]
pub struct LocalSeatStore {
    db: Arc<Database>,
}

impl LocalSeatStore {
    /// Open or create the cache file at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SEATS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read_record(&self, key: &SeatKey) -> StoreResult<Option<SeatRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEATS_TABLE)?;
        let entry = table.get((key.centre.code(), key.table, key.seat))?;
        match entry {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn seed_centre(&self, centre: FoodCentre) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SEATS_TABLE)?;
            for t in 1..=centre.table_count() {
                for s in 1..=centre.seats_per_table() {
                    let absent = table.get((centre.code(), t, s))?.is_none();
                    if absent {
                        let value = serde_json::to_vec(&SeatRecord::available())?;
                        table.insert((centre.code(), t, s), value.as_slice())?;
                    }
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn scan_centre(&self, centre: FoodCentre) -> StoreResult<CentreSeats> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SEATS_TABLE)?;

        let mut seats = CentreSeats::new();
        let range = table.range(
            (centre.code(), 0u32, 0u32)..=(centre.code(), u32::MAX, u32::MAX),
        )?;
        for entry in range {
            let (key_guard, value_guard) = entry?;
            let (_, t, s) = key_guard.value();
            let record: SeatRecord = serde_json::from_slice(value_guard.value())?;
            seats.entry(t).or_default().insert(s, record);
        }
        Ok(seats)
    }
}

#[async_trait]
impl SeatStore for LocalSeatStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn ensure_initialized(&self, centre: FoodCentre) -> StoreResult<()> {
        self.seed_centre(centre)
    }

    async fn get_seat(&self, key: &SeatKey) -> StoreResult<Option<SeatRecord>> {
        self.read_record(key)
    }

    async fn list_seats(&self, centre: FoodCentre) -> StoreResult<CentreSeats> {
        let seats = self.scan_centre(centre)?;
        if !seats.is_empty() {
            return Ok(seats);
        }
        // Lazy initialization: first reader seeds the centre
        self.seed_centre(centre)?;
        self.scan_centre(centre)
    }

    async fn book_seat(
        &self,
        key: &SeatKey,
        user_id: &str,
        booked_at: i64,
        expires_at: i64,
    ) -> StoreResult<BookOutcome> {
        let write_txn = self.db.begin_write()?;
        let outcome;
        {
            let mut table = write_txn.open_table(SEATS_TABLE)?;
            let tuple = (key.centre.code(), key.table, key.seat);

            let current: Option<SeatRecord> = match table.get(tuple)? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            };

            // A seat that was never seeded counts as available; a booked
            // seat is reclaimable only once its expiry has passed.
            let bookable = match &current {
                None => true,
                Some(record) => !record.is_booked() || record.is_expired(booked_at),
            };

            if bookable {
                let record = SeatRecord::booked(user_id, booked_at, expires_at);
                let value = serde_json::to_vec(&record)?;
                table.insert(tuple, value.as_slice())?;
                outcome = BookOutcome::Booked(record);
            } else {
                outcome = BookOutcome::Taken;
            }
        }
        write_txn.commit()?;
        Ok(outcome)
    }

    async fn release_seat(&self, key: &SeatKey) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SEATS_TABLE)?;
            let value = serde_json::to_vec(&SeatRecord::available())?;
            table.insert((key.centre.code(), key.table, key.seat), value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
