use async_trait::async_trait;

use crate::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, Result, Room, RoomId, Ticket,
    UserId,
};

/// Read-only lookup of event enrollments.
#[async_trait]
pub trait EnrollmentLookup: Send + Sync {
    /// Returns the enrollment owned by the user, if any.
    async fn find_enrollment_by_user(&self, user_id: UserId) -> Result<Option<Enrollment>>;
}

/// Read-only lookup of tickets.
#[async_trait]
pub trait TicketLookup: Send + Sync {
    /// Returns the ticket attached to an enrollment, with its type embedded.
    async fn find_ticket_by_enrollment(&self, enrollment_id: EnrollmentId)
    -> Result<Option<Ticket>>;
}

/// Read-only lookup of hotel rooms.
#[async_trait]
pub trait RoomLookup: Send + Sync {
    /// Returns the room with the given id.
    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>>;
}

/// Storage for booking records.
///
/// The store enforces no uniqueness on `user_id`. Callers decide whether a
/// user may hold more than one booking.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Returns the user's booking together with its room.
    ///
    /// When several bookings exist for the user, the one with the lowest id
    /// is returned.
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>>;

    /// Returns every booking referencing the room, in no particular order.
    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Booking>>;

    /// Inserts a new booking and returns it with its generated id.
    async fn insert(&self, user_id: UserId, room_id: RoomId) -> Result<Booking>;

    /// Points an existing booking at another room.
    ///
    /// Fails with [`StoreError::BookingNotFound`](crate::StoreError::BookingNotFound)
    /// if no booking has the given id.
    async fn update_room(&self, booking_id: BookingId, room_id: RoomId) -> Result<Booking>;
}

/// Every collaborator the booking engine reads from or writes to.
///
/// Implemented automatically for any type providing all four capabilities.
pub trait Repository: EnrollmentLookup + TicketLookup + RoomLookup + BookingStore {}

impl<T> Repository for T where T: EnrollmentLookup + TicketLookup + RoomLookup + BookingStore {}
