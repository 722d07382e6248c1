//! Booking orchestration
//!
//! The [`BookingService`] sits between the HTTP layer and the seat store:
//! policy validation, the per-user active limit, the ownership gate for
//! cancellation, and the history projection. The [`ExpirySweeper`]
//! reclaims lapsed bookings in the background.

mod history;
mod service;
mod sweeper;

pub use history::ActiveBooking;
pub use service::{BookingConfirmation, BookingService};
pub use sweeper::{ExpirySweeper, SweepStats};
