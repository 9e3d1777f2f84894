use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId, Result, Room, RoomId,
    StoreError, Ticket, TicketId, TicketStatus, TicketType, TicketTypeId, UserId,
    store::{BookingStore, EnrollmentLookup, RoomLookup, TicketLookup},
};

const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to the database at `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_booking(row: &PgRow) -> Result<Booking> {
        Ok(Booking {
            id: BookingId::new(row.try_get("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            room_id: RoomId::new(row.try_get("room_id")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_room(row: &PgRow) -> Result<Room> {
        Ok(Room {
            id: RoomId::new(row.try_get("room_id")?),
            name: row.try_get("name")?,
            capacity: row.try_get("capacity")?,
            hotel_id: HotelId::new(row.try_get("hotel_id")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_ticket(row: &PgRow) -> Result<Ticket> {
        let status: String = row.try_get("status")?;

        Ok(Ticket {
            id: TicketId::new(row.try_get("id")?),
            enrollment_id: EnrollmentId::new(row.try_get("enrollment_id")?),
            status: status.parse::<TicketStatus>()?,
            ticket_type: TicketType {
                id: TicketTypeId::new(row.try_get("ticket_type_id")?),
                name: row.try_get("name")?,
                price: row.try_get("price")?,
                is_remote: row.try_get("is_remote")?,
                includes_hotel: row.try_get("includes_hotel")?,
            },
        })
    }
}

#[async_trait]
impl EnrollmentLookup for PostgresStore {
    async fn find_enrollment_by_user(&self, user_id: UserId) -> Result<Option<Enrollment>> {
        let row = sqlx::query("SELECT id, user_id FROM enrollments WHERE user_id = $1")
            .bind(user_id.as_i32())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> Result<Enrollment> {
            Ok(Enrollment {
                id: EnrollmentId::new(row.try_get("id")?),
                user_id: UserId::new(row.try_get("user_id")?),
            })
        })
        .transpose()
    }
}

#[async_trait]
impl TicketLookup for PostgresStore {
    async fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>> {
        let row = sqlx::query(
            r#"
            SELECT t.id, t.enrollment_id, t.status, t.ticket_type_id,
                   tt.name, tt.price, tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_ticket).transpose()
    }
}

#[async_trait]
impl RoomLookup for PostgresStore {
    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>> {
        let row = sqlx::query(
            r#"
            SELECT id AS room_id, name, capacity, hotel_id, created_at, updated_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_room).transpose()
    }
}

#[async_trait]
impl BookingStore for PostgresStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>> {
        let row = sqlx::query(
            r#"
            SELECT b.id AS booking_id, r.id AS room_id, r.name, r.capacity, r.hotel_id,
                   r.created_at, r.updated_at
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            ORDER BY b.id ASC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| -> Result<BookingWithRoom> {
            Ok(BookingWithRoom {
                id: BookingId::new(row.try_get("booking_id")?),
                room: Self::row_to_room(&row)?,
            })
        })
        .transpose()
    }

    async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = $1"
        ))
        .bind(room_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_booking).collect()
    }

    async fn insert(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        let row = sqlx::query(&format!(
            "INSERT INTO bookings (user_id, room_id) VALUES ($1, $2) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(room_id.as_i32())
        .fetch_one(&self.pool)
        .await?;

        let booking = Self::row_to_booking(&row)?;
        tracing::debug!(booking_id = %booking.id, %user_id, %room_id, "booking inserted");
        Ok(booking)
    }

    async fn update_room(&self, booking_id: BookingId, room_id: RoomId) -> Result<Booking> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE bookings
            SET room_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id.as_i32())
        .bind(room_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_booking(&row),
            None => Err(StoreError::BookingNotFound(booking_id)),
        }
    }
}
