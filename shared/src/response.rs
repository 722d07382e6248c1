//! API Response types
//!
//! Standardized API response envelope for the entire service.
//!
//! All endpoints answer with the same shape:
//! ```json
//! { "success": true,  "data": { ... }, "message": "..." }
//! { "success": false, "code": 7004, "error": "Seat is no longer available" }
//! { "success": false, "code": 2, "error": "Validation failed", "details": ["..."] }
//! ```

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Error code (present on failure, 0 on success when set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message (success side)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error description (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional error details (itemized validation errors, context)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: None,
            message: None,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    /// Create a success response with a message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code: None,
            message: Some(message.into()),
            data: Some(data),
            error: None,
            details: None,
        }
    }

    /// Create a failure response from an [`AppError`]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            success: false,
            code: Some(err.code.code()),
            message: None,
            data: None,
            error: Some(err.message.clone()),
            details: err.details.clone(),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self::success_with_message("OK", ()).without_data()
    }

    /// Create a success response with only a message
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self::success_with_message(message, ()).without_data()
    }

    fn without_data(mut self) -> Self {
        self.data = None;
        self
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self::from_error(&err)
    }
}

// ===== Axum Integration =====

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.success {
            http::StatusCode::OK
        } else {
            self.code
                .and_then(|c| ErrorCode::try_from(c).ok())
                .map(|c| c.http_status())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = ApiResponse::success(42);
        assert!(response.success);
        assert_eq!(response.data, Some(42));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_ok_with_message() {
        let response = ApiResponse::ok_with_message("Cancellation allowed");
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Cancellation allowed"));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_from_error() {
        let err = AppError::seat_taken();
        let response = ApiResponse::<()>::from_error(&err);

        assert!(!response.success);
        assert_eq!(response.code, Some(7004));
        assert_eq!(response.error.as_deref(), Some("Seat is no longer available"));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_from_validation_errors_keeps_details_array() {
        let err = AppError::validation_errors(vec!["Valid userId is required".to_string()]);
        let response = ApiResponse::<()>::from_error(&err);

        assert!(!response.success);
        let details = response.details.unwrap();
        assert_eq!(details.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"hello\""));
        assert!(!json.contains("error"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"success":true,"data":42}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(42));

        let json = r#"{"success":false,"code":7004,"error":"Seat is no longer available"}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.code, Some(7004));
    }
}
