//! Food centre catalog
//!
//! 固定目录：三个食阁的桌位布局，运行期间不可变。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A food court location with a fixed table/seat layout
///
/// The catalog is static configuration: centres are never created or
/// mutated at runtime, and the layout defines the identity space of every
/// [`super::SeatRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodCentre {
    /// Maxwell Food Centre - 6 tables, 12 seats each
    Maxwell,
    /// Newton Food Centre - 5 tables, 10 seats each
    Newton,
    /// Changi Village Food Centre - 6 tables, 10 seats each
    ChangiVillage,
}

impl FoodCentre {
    /// All centres in the catalog
    pub const ALL: [FoodCentre; 3] = [
        FoodCentre::Maxwell,
        FoodCentre::Newton,
        FoodCentre::ChangiVillage,
    ];

    /// Wire/storage code for this centre
    pub fn code(&self) -> &'static str {
        match self {
            FoodCentre::Maxwell => "maxwell",
            FoodCentre::Newton => "newton",
            FoodCentre::ChangiVillage => "changiVillage",
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FoodCentre::Maxwell => "Maxwell Food Centre",
            FoodCentre::Newton => "Newton Food Centre",
            FoodCentre::ChangiVillage => "Changi Village Food Centre",
        }
    }

    /// Number of tables at this centre
    pub fn table_count(&self) -> u32 {
        match self {
            FoodCentre::Maxwell => 6,
            FoodCentre::Newton => 5,
            FoodCentre::ChangiVillage => 6,
        }
    }

    /// Seats per table at this centre
    pub fn seats_per_table(&self) -> u32 {
        match self {
            FoodCentre::Maxwell => 12,
            FoodCentre::Newton => 10,
            FoodCentre::ChangiVillage => 10,
        }
    }

    /// Total seat count across all tables
    pub fn total_seats(&self) -> u32 {
        self.table_count() * self.seats_per_table()
    }

    /// Whether `(table, seat)` falls inside this centre's layout (1-based)
    pub fn contains(&self, table: u32, seat: u32) -> bool {
        (1..=self.table_count()).contains(&table) && (1..=self.seats_per_table()).contains(&seat)
    }
}

impl fmt::Display for FoodCentre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when parsing an unknown centre code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCentre(pub String);

impl fmt::Display for UnknownCentre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown food centre: {}", self.0)
    }
}

impl std::error::Error for UnknownCentre {}

impl FromStr for FoodCentre {
    type Err = UnknownCentre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maxwell" => Ok(FoodCentre::Maxwell),
            "newton" => Ok(FoodCentre::Newton),
            "changiVillage" => Ok(FoodCentre::ChangiVillage),
            other => Err(UnknownCentre(other.to_string())),
        }
    }
}
