//! Database Module
//!
//! Handles the embedded SurrealDB connection for the primary seat store.

pub mod models;
pub mod repository;

use crate::core::ServerError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// SurrealDB namespace for this service
pub const NAMESPACE: &str = "chopelah";
/// SurrealDB database holding seat documents
pub const DATABASE: &str = "seats";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(db_path: &str) -> Result<Self, ServerError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| ServerError::Storage(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| ServerError::Storage(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database connection established (SurrealDB RocksDB at {db_path})");

        Ok(Self { db })
    }
}
