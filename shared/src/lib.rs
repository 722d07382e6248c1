//! Shared types for the ChopeLah reservation service
//!
//! Common types used across the workspace: the unified error system,
//! the food centre / seat domain model, the API response envelope and
//! small time/ID utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{CentreSeats, FoodCentre, SeatCounts, SeatKey, SeatRecord, SeatStatus};
pub use response::ApiResponse;
