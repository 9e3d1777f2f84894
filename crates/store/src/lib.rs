//! Persistence layer for the booking service.
//!
//! Exposes the read-only lookups (enrollments, tickets, rooms) and the
//! booking store consumed by the booking engine, with an in-memory
//! implementation for tests and a PostgreSQL implementation for deployment.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::{BookingId, EnrollmentId, HotelId, RoomId, TicketId, TicketTypeId, UserId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{Booking, BookingWithRoom, Enrollment, Room, Ticket, TicketStatus, TicketType};
pub use store::{BookingStore, EnrollmentLookup, Repository, RoomLookup, TicketLookup};
