//! Booking service applying eligibility and capacity rules over the store.

use store::{BookingWithRoom, Repository, Room, RoomId, StoreError, UserId};

use crate::error::DomainError;

use super::{
    BookingConfirmation, BookingPolicy, ChangeBookingRoom, CreateBooking, ForbiddenReason,
    check_capacity, check_ticket_eligibility,
};

fn reject(reason: ForbiddenReason) -> DomainError {
    tracing::debug!(reason = reason.as_label(), "booking rejected");
    metrics::counter!("booking_rejections_total", "reason" => reason.as_label()).increment(1);
    DomainError::Forbidden(reason)
}

/// Service for reading, creating and moving room bookings.
///
/// Every write runs an ordered chain of checks and stops at the first
/// failure. Checks read the store and then write to it without isolation, so
/// concurrent writes to one room can overbook it.
pub struct BookingService<S: Repository> {
    store: S,
    policy: BookingPolicy,
}

impl<S: Repository> BookingService<S> {
    /// Creates a new booking service with the default policy.
    pub fn new(store: S) -> Self {
        Self::with_policy(store, BookingPolicy::default())
    }

    /// Creates a new booking service with an explicit policy.
    pub fn with_policy(store: S, policy: BookingPolicy) -> Self {
        Self { store, policy }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the policy in effect.
    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    /// Loads the user's booking with its room.
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, user_id: UserId) -> Result<BookingWithRoom, DomainError> {
        self.store
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::booking_of_user_not_found(user_id))
    }

    /// Books a room for the user.
    ///
    /// Rules, in order: the user's ticket must be in person, include hotel
    /// and be paid; the room must exist; the room must have a free slot.
    #[tracing::instrument(skip(self))]
    pub async fn create_booking(
        &self,
        cmd: CreateBooking,
    ) -> Result<BookingConfirmation, DomainError> {
        self.ensure_eligible(cmd.user_id).await?;

        if self.policy.single_booking_per_user
            && self.store.find_by_user(cmd.user_id).await?.is_some()
        {
            return Err(reject(ForbiddenReason::AlreadyBooked));
        }

        let room = self.load_room(cmd.room_id).await?;
        self.ensure_vacancy(&room).await?;

        let booking = self.store.insert(cmd.user_id, room.id).await?;
        metrics::counter!("bookings_created_total").increment(1);

        Ok(BookingConfirmation {
            booking_id: booking.id,
        })
    }

    /// Moves the user's booking to another room.
    ///
    /// The user must already hold a booking. The occupancy of the target room
    /// includes the booking being moved, so moving within a full room is
    /// rejected. Unless [`BookingPolicy::verify_booking_owner`] is set, the
    /// supplied booking id is trusted as the user's own.
    #[tracing::instrument(skip(self))]
    pub async fn change_room(
        &self,
        cmd: ChangeBookingRoom,
    ) -> Result<BookingConfirmation, DomainError> {
        let current = self
            .store
            .find_by_user(cmd.user_id)
            .await?
            .ok_or_else(|| reject(ForbiddenReason::NoExistingBooking))?;

        if self.policy.verify_booking_owner && current.id != cmd.booking_id {
            return Err(reject(ForbiddenReason::BookingNotOwned));
        }

        let room = self.load_room(cmd.room_id).await?;
        self.ensure_vacancy(&room).await?;

        self.store
            .update_room(cmd.booking_id, room.id)
            .await
            .map_err(|e| match e {
                StoreError::BookingNotFound(id) => DomainError::booking_not_found(id),
                other => DomainError::Store(other),
            })?;
        metrics::counter!("bookings_updated_total").increment(1);

        Ok(BookingConfirmation {
            booking_id: cmd.booking_id,
        })
    }

    async fn ensure_eligible(&self, user_id: UserId) -> Result<(), DomainError> {
        let enrollment = self
            .store
            .find_enrollment_by_user(user_id)
            .await?
            .ok_or_else(|| reject(ForbiddenReason::NoEnrollment))?;

        let ticket = self
            .store
            .find_ticket_by_enrollment(enrollment.id)
            .await?
            .ok_or_else(|| reject(ForbiddenReason::NoTicket))?;

        check_ticket_eligibility(&ticket).map_err(reject)
    }

    async fn load_room(&self, room_id: RoomId) -> Result<Room, DomainError> {
        self.store
            .find_room(room_id)
            .await?
            .ok_or_else(|| DomainError::room_not_found(room_id))
    }

    async fn ensure_vacancy(&self, room: &Room) -> Result<(), DomainError> {
        let occupied = self.store.find_by_room(room.id).await?.len();
        check_capacity(room, occupied).map_err(reject)
    }
}
