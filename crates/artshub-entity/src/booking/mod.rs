//! Booking entities and interval arithmetic.

pub mod model;
pub mod overlap;
pub mod status;

pub use model::{Booking, CreateBooking};
pub use overlap::BookedInterval;
pub use status::BookingStatus;
