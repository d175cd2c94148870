//! Repository implementations for the ArtsHub entities.

pub mod booking;
pub mod resource;

pub use booking::BookingRepository;
pub use resource::ResourceRepository;
