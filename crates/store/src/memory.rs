use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, Result, Room, RoomId,
    StoreError, Ticket, UserId,
    store::{BookingStore, EnrollmentLookup, RoomLookup, TicketLookup},
};

#[derive(Debug, Default)]
struct InMemoryState {
    rooms: HashMap<RoomId, Room>,
    enrollments: HashMap<UserId, Enrollment>,
    tickets: HashMap<EnrollmentId, Ticket>,
    // Ordered by id so "first booking for a user" is deterministic.
    bookings: BTreeMap<BookingId, Booking>,
    next_booking_id: i32,
}

/// In-memory store implementation for testing and local runs.
///
/// Provides the same lookups and booking operations as the PostgreSQL
/// implementation. Booking ids are assigned sequentially starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a room.
    pub async fn add_room(&self, room: Room) {
        self.state.write().await.rooms.insert(room.id, room);
    }

    /// Adds or replaces the enrollment of a user.
    pub async fn add_enrollment(&self, enrollment: Enrollment) {
        self.state
            .write()
            .await
            .enrollments
            .insert(enrollment.user_id, enrollment);
    }

    /// Adds or replaces the ticket of an enrollment.
    pub async fn add_ticket(&self, ticket: Ticket) {
        self.state
            .write()
            .await
            .tickets
            .insert(ticket.enrollment_id, ticket);
    }

    /// Returns the total number of bookings stored.
    pub async fn booking_count(&self) -> usize {
        self.state.read().await.bookings.len()
    }

    /// Returns a booking by id.
    pub async fn booking(&self, booking_id: BookingId) -> Option<Booking> {
        self.state.read().await.bookings.get(&booking_id).cloned()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = InMemoryState::default();
    }
}

#[async_trait]
impl EnrollmentLookup for InMemoryStore {
    async fn find_enrollment_by_user(&self, user_id: UserId) -> Result<Option<Enrollment>> {
        Ok(self.state.read().await.enrollments.get(&user_id).copied())
    }
}

#[async_trait]
impl TicketLookup for InMemoryStore {
    async fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>> {
        Ok(self.state.read().await.tickets.get(&enrollment_id).cloned())
    }
}

#[async_trait]
impl RoomLookup for InMemoryStore {
    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>> {
        Ok(self.state.read().await.rooms.get(&room_id).cloned())
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>> {
        let state = self.state.read().await;
        let Some(booking) = state.bookings.values().find(|b| b.user_id == user_id) else {
            return Ok(None);
        };

        // Bookings are only ever created against rooms that existed at the time.
        let room = state.rooms.get(&booking.room_id).cloned().ok_or_else(|| {
            StoreError::InvalidRecord(format!(
                "booking {} references missing room {}",
                booking.id, booking.room_id
            ))
        })?;

        Ok(Some(BookingWithRoom {
            id: booking.id,
            room,
        }))
    }

    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        let state = self.state.read().await;
        Ok(state
            .bookings
            .values()
            .filter(|b| b.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        let mut state = self.state.write().await;

        state.next_booking_id += 1;
        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(state.next_booking_id),
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        };
        state.bookings.insert(booking.id, booking.clone());

        Ok(booking)
    }

    async fn update_room(&self, booking_id: BookingId, room_id: RoomId) -> Result<Booking> {
        let mut state = self.state.write().await;
        let booking = state
            .bookings
            .get_mut(&booking_id)
            .ok_or(StoreError::BookingNotFound(booking_id))?;

        booking.room_id = room_id;
        booking.updated_at = Utc::now();

        Ok(booking.clone())
    }
}
