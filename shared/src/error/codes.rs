//! Unified error codes for the ChopeLah service
//!
//! This module defines all error codes used across the server and web client.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission / ownership errors
//! - 4xxx: Reservation policy errors
//! - 7xxx: Centre / seat errors
//! - 9xxx: System errors (94xx: storage)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Booking belongs to another user
    NotBookingOwner = 2002,

    // ==================== 4xxx: Reservation ====================
    /// Duration below the policy minimum
    DurationTooShort = 4001,
    /// Duration above the policy maximum
    DurationTooLong = 4002,
    /// Cancellation attempted inside the cancellation window
    CancellationWindowClosed = 4003,
    /// User already holds the maximum number of active reservations
    ActiveReservationLimit = 4004,

    // ==================== 7xxx: Centre / Seat ====================
    /// Food centre not found in the catalog
    CentreNotFound = 7001,
    /// Table number outside the centre layout
    TableOutOfRange = 7002,
    /// Seat number outside the table layout
    SeatOutOfRange = 7003,
    /// Seat is already booked
    SeatTaken = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Storage unavailable (primary store unreachable)
    StorageUnavailable = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9402,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::NotBookingOwner => "You can only cancel your own bookings",

            // Reservation
            ErrorCode::DurationTooShort => "Duration is below the minimum",
            ErrorCode::DurationTooLong => "Duration exceeds the maximum",
            ErrorCode::CancellationWindowClosed => {
                "Cannot cancel this close to the reservation time"
            }
            ErrorCode::ActiveReservationLimit => "Active reservation limit reached",

            // Centre / Seat
            ErrorCode::CentreNotFound => "Food centre not found",
            ErrorCode::TableOutOfRange => "Table number is out of range",
            ErrorCode::SeatOutOfRange => "Seat number is out of range",
            ErrorCode::SeatTaken => "Seat is no longer available",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageUnavailable => "Storage unavailable, please try again",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::NotBookingOwner),

            // Reservation
            4001 => Ok(ErrorCode::DurationTooShort),
            4002 => Ok(ErrorCode::DurationTooLong),
            4003 => Ok(ErrorCode::CancellationWindowClosed),
            4004 => Ok(ErrorCode::ActiveReservationLimit),

            // Centre / Seat
            7001 => Ok(ErrorCode::CentreNotFound),
            7002 => Ok(ErrorCode::TableOutOfRange),
            7003 => Ok(ErrorCode::SeatOutOfRange),
            7004 => Ok(ErrorCode::SeatTaken),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageUnavailable),
            9402 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::Unknown.code(), 1);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::InvalidFormat.code(), 6);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::ValueOutOfRange.code(), 8);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);

        // Permission
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::NotBookingOwner.code(), 2002);

        // Reservation
        assert_eq!(ErrorCode::DurationTooShort.code(), 4001);
        assert_eq!(ErrorCode::DurationTooLong.code(), 4002);
        assert_eq!(ErrorCode::CancellationWindowClosed.code(), 4003);
        assert_eq!(ErrorCode::ActiveReservationLimit.code(), 4004);

        // Centre / Seat
        assert_eq!(ErrorCode::CentreNotFound.code(), 7001);
        assert_eq!(ErrorCode::TableOutOfRange.code(), 7002);
        assert_eq!(ErrorCode::SeatOutOfRange.code(), 7003);
        assert_eq!(ErrorCode::SeatTaken.code(), 7004);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
        assert_eq!(ErrorCode::NetworkError.code(), 9003);
        assert_eq!(ErrorCode::TimeoutError.code(), 9004);
        assert_eq!(ErrorCode::ConfigError.code(), 9005);

        // Storage
        assert_eq!(ErrorCode::StorageUnavailable.code(), 9401);
        assert_eq!(ErrorCode::StorageCorrupted.code(), 9402);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::SeatTaken.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(2002), Ok(ErrorCode::NotBookingOwner));
        assert_eq!(ErrorCode::try_from(4004), Ok(ErrorCode::ActiveReservationLimit));
        assert_eq!(ErrorCode::try_from(7004), Ok(ErrorCode::SeatTaken));
        assert_eq!(ErrorCode::try_from(9401), Ok(ErrorCode::StorageUnavailable));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(5001), Err(InvalidErrorCode(5001)));
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3");

        let code = ErrorCode::SeatTaken;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "7004");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("7004").unwrap();
        assert_eq!(code, ErrorCode::SeatTaken);

        let code: ErrorCode = serde_json::from_str("9401").unwrap();
        assert_eq!(code, ErrorCode::StorageUnavailable);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::SeatTaken), "7004");
        assert_eq!(format!("{}", ErrorCode::InternalError), "9001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::SeatTaken.message(),
            "Seat is no longer available"
        );
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::NotBookingOwner.message(),
            "You can only cancel your own bookings"
        );
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::NotBookingOwner,
            ErrorCode::SeatTaken,
            ErrorCode::StorageUnavailable,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }
}
