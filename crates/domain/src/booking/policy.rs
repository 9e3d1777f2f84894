//! Booking rules applied on every write.

use store::{Room, Ticket, TicketStatus};

use super::ForbiddenReason;

/// Optional rules layered on top of the eligibility and capacity checks.
///
/// Both switches default to off, which leaves the store free to hold several
/// bookings per user and lets a room change target any booking id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Reject new bookings from users who already hold one.
    pub single_booking_per_user: bool,

    /// Reject room changes whose booking id is not the user's booking.
    pub verify_booking_owner: bool,
}

impl BookingPolicy {
    /// Policy with every optional rule enabled.
    pub fn strict() -> Self {
        Self {
            single_booking_per_user: true,
            verify_booking_owner: true,
        }
    }
}

/// Checks that a ticket entitles its holder to a hotel room.
///
/// Rules are evaluated in order: remote attendance, hotel inclusion, payment.
pub fn check_ticket_eligibility(ticket: &Ticket) -> Result<(), ForbiddenReason> {
    if ticket.ticket_type.is_remote {
        return Err(ForbiddenReason::RemoteTicket);
    }
    if !ticket.ticket_type.includes_hotel {
        return Err(ForbiddenReason::TicketWithoutHotel);
    }
    if ticket.status != TicketStatus::Paid {
        return Err(ForbiddenReason::TicketNotPaid);
    }
    Ok(())
}

/// Checks that a room holding `occupied` bookings can take one more.
///
/// A room is full once its occupancy reaches its capacity.
pub fn check_capacity(room: &Room, occupied: usize) -> Result<(), ForbiddenReason> {
    let occupied = i64::try_from(occupied).unwrap_or(i64::MAX);
    if occupied >= i64::from(room.capacity) {
        return Err(ForbiddenReason::RoomFull);
    }
    Ok(())
}
