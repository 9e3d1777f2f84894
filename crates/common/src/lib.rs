//! Shared types used across the booking service crates.

pub mod types;

pub use types::{BookingId, EnrollmentId, HotelId, RoomId, TicketId, TicketTypeId, UserId};
