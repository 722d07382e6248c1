//! Storage document models

mod seat;

pub use seat::SeatDoc;
