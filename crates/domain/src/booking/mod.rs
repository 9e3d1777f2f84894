//! Booking engine and related types.

mod commands;
mod policy;
mod service;

pub use commands::{BookingConfirmation, ChangeBookingRoom, CreateBooking};
pub use policy::{BookingPolicy, check_capacity, check_ticket_eligibility};
pub use service::BookingService;

use thiserror::Error;

/// Business rules that can reject a booking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ForbiddenReason {
    /// The user has no enrollment for the event.
    #[error("user is not enrolled in the event")]
    NoEnrollment,

    /// The user's enrollment has no ticket.
    #[error("enrollment has no ticket")]
    NoTicket,

    /// Remote tickets never occupy a room.
    #[error("ticket is for remote attendance")]
    RemoteTicket,

    /// The ticket type does not include accommodation.
    #[error("ticket does not include hotel")]
    TicketWithoutHotel,

    /// The ticket has not been paid.
    #[error("ticket is not paid")]
    TicketNotPaid,

    /// The room already holds as many bookings as its capacity.
    #[error("room is full")]
    RoomFull,

    /// Changing a booking requires the user to hold one.
    #[error("user has no booking to change")]
    NoExistingBooking,

    /// The user already holds a booking.
    #[error("user already has a booking")]
    AlreadyBooked,

    /// The booking being changed is not the user's booking.
    #[error("booking does not belong to user")]
    BookingNotOwned,
}

impl ForbiddenReason {
    /// Short label used for metrics and structured logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ForbiddenReason::NoEnrollment => "no_enrollment",
            ForbiddenReason::NoTicket => "no_ticket",
            ForbiddenReason::RemoteTicket => "remote_ticket",
            ForbiddenReason::TicketWithoutHotel => "ticket_without_hotel",
            ForbiddenReason::TicketNotPaid => "ticket_not_paid",
            ForbiddenReason::RoomFull => "room_full",
            ForbiddenReason::NoExistingBooking => "no_existing_booking",
            ForbiddenReason::AlreadyBooked => "already_booked",
            ForbiddenReason::BookingNotOwned => "booking_not_owned",
        }
    }
}
