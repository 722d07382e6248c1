//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::CentreNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::SeatTaken => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::NotBookingOwner => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError | Self::StorageUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::StorageCorrupted => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/policy errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
