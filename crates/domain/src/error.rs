//! Domain error types.

use store::{BookingId, RoomId, StoreError, UserId};
use thiserror::Error;

use crate::booking::ForbiddenReason;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced booking or room does not exist.
    #[error("{entity} not found ({key})")]
    NotFound { entity: &'static str, key: String },

    /// A booking rule rejected the operation.
    #[error("Forbidden: {0}")]
    Forbidden(ForbiddenReason),

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    pub(crate) fn booking_of_user_not_found(user_id: UserId) -> Self {
        DomainError::NotFound {
            entity: "Booking",
            key: format!("user_id={user_id}"),
        }
    }

    pub(crate) fn booking_not_found(booking_id: BookingId) -> Self {
        DomainError::NotFound {
            entity: "Booking",
            key: format!("id={booking_id}"),
        }
    }

    pub(crate) fn room_not_found(room_id: RoomId) -> Self {
        DomainError::NotFound {
            entity: "Room",
            key: format!("id={room_id}"),
        }
    }

    /// Returns true for the not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// Returns true for the forbidden outcome.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, DomainError::Forbidden(_))
    }

    /// Returns the rule that rejected the operation, if any.
    pub fn forbidden_reason(&self) -> Option<ForbiddenReason> {
        match self {
            DomainError::Forbidden(reason) => Some(*reason),
            _ => None,
        }
    }
}
