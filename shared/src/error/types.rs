//! Application error type

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the service, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (itemized validation errors, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (violation list, context, etc.)
    pub details: Option<Value>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self.details {
            Some(Value::Object(map)) => {
                map.insert(key.into(), value.into());
            }
            _ => {
                let mut map = serde_json::Map::new();
                map.insert(key.into(), value.into());
                self.details = Some(Value::Object(map));
            }
        }
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a validation error carrying the full, itemized violation list
    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: "Validation failed".to_string(),
            details: Some(Value::Array(
                errors.into_iter().map(Value::String).collect(),
            )),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
    }

    /// Create a centre not found error
    pub fn centre_not_found(code: impl Into<String>) -> Self {
        Self::with_message(
            ErrorCode::CentreNotFound,
            format!("Unknown food centre '{}'", code.into()),
        )
    }

    /// Create a seat conflict error ("seat no longer available")
    pub fn seat_taken() -> Self {
        Self::new(ErrorCode::SeatTaken)
    }

    /// Create an ownership error (cancellation by non-owner)
    pub fn not_booking_owner() -> Self {
        Self::new(ErrorCode::NotBookingOwner)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a storage unavailable error
    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageUnavailable, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        let body = crate::response::ApiResponse::<()>::from_error(&self);
        (status, Json(body)).into_response()
    }
}
