//! Records held by the booking store and its read-only lookups.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    BookingId, EnrollmentId, HotelId, RoomId, StoreError, TicketId, TicketTypeId, UserId,
};

/// A hotel room that attendees can be booked into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Maximum number of simultaneous bookings the room admits.
    pub capacity: i32,
    pub hotel_id: HotelId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Creates a room stamped with the current time.
    pub fn new(id: RoomId, hotel_id: HotelId, name: impl Into<String>, capacity: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Assignment of one user to one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A booking together with the room it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithRoom {
    pub id: BookingId,
    pub room: Room,
}

/// A user's registration for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
}

impl Enrollment {
    pub fn new(id: EnrollmentId, user_id: UserId) -> Self {
        Self { id, user_id }
    }
}

/// Payment status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

impl TicketStatus {
    /// Returns the stored representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "RESERVED",
            TicketStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESERVED" => Ok(TicketStatus::Reserved),
            "PAID" => Ok(TicketStatus::Paid),
            other => Err(StoreError::InvalidRecord(format!(
                "unknown ticket status '{other}'"
            ))),
        }
    }
}

/// The kind of ticket a user bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub name: String,
    pub price: i32,
    /// The holder attends online and never occupies a venue room.
    pub is_remote: bool,
    /// The ticket entitles the holder to hotel accommodation.
    pub includes_hotel: bool,
}

impl TicketType {
    pub fn new(
        id: TicketTypeId,
        name: impl Into<String>,
        price: i32,
        is_remote: bool,
        includes_hotel: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            is_remote,
            includes_hotel,
        }
    }
}

/// A ticket attached to an enrollment, embedding its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
}

impl Ticket {
    pub fn new(
        id: TicketId,
        enrollment_id: EnrollmentId,
        status: TicketStatus,
        ticket_type: TicketType,
    ) -> Self {
        Self {
            id,
            enrollment_id,
            status,
            ticket_type,
        }
    }
}
