//! Booking commands.

use common::{BookingId, RoomId, UserId};

/// Command to book a room for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateBooking {
    /// The user making the booking.
    pub user_id: UserId,

    /// The room to book.
    pub room_id: RoomId,
}

impl CreateBooking {
    /// Creates a new CreateBooking command.
    pub fn new(user_id: UserId, room_id: RoomId) -> Self {
        Self { user_id, room_id }
    }
}

/// Command to move an existing booking to another room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeBookingRoom {
    /// The user owning the booking.
    pub user_id: UserId,

    /// The room to move into.
    pub room_id: RoomId,

    /// The booking being changed.
    pub booking_id: BookingId,
}

impl ChangeBookingRoom {
    /// Creates a new ChangeBookingRoom command.
    pub fn new(user_id: UserId, room_id: RoomId, booking_id: BookingId) -> Self {
        Self {
            user_id,
            room_id,
            booking_id,
        }
    }
}

/// Outcome of a successful create or change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
}
