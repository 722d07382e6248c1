//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission / ownership errors
/// - 4xxx: Reservation policy errors
/// - 7xxx: Centre / seat errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission / ownership errors (2xxx)
    Permission,
    /// Reservation policy errors (4xxx)
    Reservation,
    /// Centre / seat errors (7xxx)
    Seat,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Reservation,
            7000..8000 => Self::Seat,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Reservation => "reservation",
            Self::Seat => "seat",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(8), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Reservation);
        assert_eq!(ErrorCategory::from_code(7004), ErrorCategory::Seat);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9401), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::NotBookingOwner.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::DurationTooShort.category(),
            ErrorCategory::Reservation
        );
        assert_eq!(ErrorCode::SeatTaken.category(), ErrorCategory::Seat);
        assert_eq!(
            ErrorCode::StorageUnavailable.category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Auth.name(), "auth");
        assert_eq!(ErrorCategory::Permission.name(), "permission");
        assert_eq!(ErrorCategory::Reservation.name(), "reservation");
        assert_eq!(ErrorCategory::Seat.name(), "seat");
        assert_eq!(ErrorCategory::System.name(), "system");
    }

    #[test]
    fn test_category_serialize() {
        let category = ErrorCategory::Reservation;
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"reservation\"");

        let category: ErrorCategory = serde_json::from_str("\"seat\"").unwrap();
        assert_eq!(category, ErrorCategory::Seat);
    }
}
