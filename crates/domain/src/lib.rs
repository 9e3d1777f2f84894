//! Domain layer for the booking service.
//!
//! This crate provides the booking eligibility and assignment engine:
//! - BookingService for reading, creating and moving bookings
//! - BookingPolicy with the rule checks applied on every write
//! - DomainError separating not-found from forbidden outcomes

pub mod booking;
pub mod error;

pub use booking::{
    BookingConfirmation, BookingPolicy, BookingService, ChangeBookingRoom, CreateBooking,
    ForbiddenReason, check_capacity, check_ticket_eligibility,
};
pub use error::DomainError;
