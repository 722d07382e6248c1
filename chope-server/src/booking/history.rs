//! Booking History View
//!
//! Read-only projection of the seat store into "my active bookings".
//! Projections are computed per call and never cached.

use super::BookingService;
use crate::db::repository::SeatStore;
use serde::Serialize;
use shared::{AppResult, FoodCentre};

/// One active booking, paired with its seat identity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBooking {
    pub food_centre: FoodCentre,
    pub food_centre_name: &'static str,
    pub table: u32,
    pub seat: u32,
    pub booked_at: i64,
    pub expires_at: i64,
}

impl BookingService {
    /// Active (booked and not yet expired) bookings for `user_id`,
    /// scanning all centres. Display-only; no ordering guarantee.
    pub async fn active_bookings_for(&self, user_id: &str) -> AppResult<Vec<ActiveBooking>> {
        self.active_bookings_at(user_id, shared::util::now_millis())
            .await
    }

    /// Same projection evaluated at an explicit point in time
    pub async fn active_bookings_at(
        &self,
        user_id: &str,
        now_ms: i64,
    ) -> AppResult<Vec<ActiveBooking>> {
        let mut bookings = Vec::new();

        for centre in FoodCentre::ALL {
            let seats = self.store().list_seats(centre).await?;
            for (table, row) in &seats {
                for (seat, record) in row {
                    if record.is_active(now_ms) && record.booked_by.as_deref() == Some(user_id) {
                        bookings.push(ActiveBooking {
                            food_centre: centre,
                            food_centre_name: centre.display_name(),
                            table: *table,
                            seat: *seat,
                            booked_at: record.booked_at.unwrap_or_default(),
                            expires_at: record.expires_at.unwrap_or_default(),
                        });
                    }
                }
            }
        }

        Ok(bookings)
    }
}
