use serde::{Deserialize, Serialize};

/// Defines an integer identifier newtype backed by a database serial key.
///
/// Identifiers are plain `i32` on the wire and in storage; the newtype only
/// exists so a room id can never be passed where a booking id is expected.
macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw identifier value.
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Wraps a raw value only if it is a valid (positive) identifier.
            pub fn positive(value: i64) -> Option<Self> {
                i32::try_from(value).ok().filter(|v| *v > 0).map(Self)
            }

            /// Returns the underlying integer.
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

integer_id!(
    /// Identifier of an authenticated user.
    UserId
);

integer_id!(
    /// Identifier of a hotel room.
    RoomId
);

integer_id!(
    /// Identifier of a booking record.
    BookingId
);

integer_id!(
    /// Identifier of a user's event enrollment.
    EnrollmentId
);

integer_id!(
    /// Identifier of a hotel.
    HotelId
);

integer_id!(
    /// Identifier of a ticket.
    TicketId
);

integer_id!(TicketTypeId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_accepts_valid_ids() {
        assert_eq!(RoomId::positive(7), Some(RoomId::new(7)));
    }

    #[test]
    fn positive_rejects_zero_negative_and_overflow() {
        assert_eq!(BookingId::positive(0), None);
        assert_eq!(BookingId::positive(-3), None);
        assert_eq!(BookingId::positive(i64::from(i32::MAX) + 1), None);
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&BookingId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(id, UserId::new(5));
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(HotelId::new(3).to_string(), "3");
    }
}
