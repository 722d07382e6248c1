//! Unified error system for the ChopeLah service
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / ownership errors
//! - 4xxx: Reservation policy errors
//! - 7xxx: Centre / seat errors
//! - 9xxx: System errors (94xx: storage)
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! // Create an error with custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid duration");
//!
//! // Create a validation error carrying the full violation list
//! let err = AppError::validation_errors(vec![
//!     "Valid userId is required".to_string(),
//!     "Duration must be at least 30 minutes".to_string(),
//! ]);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
