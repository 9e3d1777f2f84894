//! PostgreSQL integration tests
//!
//! These tests share one PostgreSQL container and truncate the tables before
//! each test, so they run serially. Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration
//! ```

use std::sync::Arc;

use serial_test::serial;
use sqlx::PgPool;
use store::{
    BookingId, BookingStore, EnrollmentId, EnrollmentLookup, PostgresStore, RoomId, RoomLookup,
    StoreError, TicketLookup, TicketStatus, UserId,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query(
        "TRUNCATE TABLE bookings, tickets, ticket_types, enrollments, rooms, hotels RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .unwrap();

    PostgresStore::new(pool)
}

async fn create_hotel(pool: &PgPool) -> i32 {
    sqlx::query_scalar("INSERT INTO hotels (name) VALUES ('Driven Resort') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn create_room(pool: &PgPool, hotel_id: i32, capacity: i32) -> RoomId {
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO rooms (name, capacity, hotel_id) VALUES ('101', $1, $2) RETURNING id",
    )
    .bind(capacity)
    .bind(hotel_id)
    .fetch_one(pool)
    .await
    .unwrap();
    RoomId::new(id)
}

async fn create_ticket(
    pool: &PgPool,
    user_id: UserId,
    status: &str,
    is_remote: bool,
    includes_hotel: bool,
) -> EnrollmentId {
    let enrollment_id: i32 =
        sqlx::query_scalar("INSERT INTO enrollments (user_id) VALUES ($1) RETURNING id")
            .bind(user_id.as_i32())
            .fetch_one(pool)
            .await
            .unwrap();

    let ticket_type_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO ticket_types (name, price, is_remote, includes_hotel)
        VALUES ('Presencial', 600, $1, $2)
        RETURNING id
        "#,
    )
    .bind(is_remote)
    .bind(includes_hotel)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO tickets (ticket_type_id, enrollment_id, status) VALUES ($1, $2, $3)")
        .bind(ticket_type_id)
        .bind(enrollment_id)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();

    EnrollmentId::new(enrollment_id)
}

#[tokio::test]
#[serial]
async fn insert_and_find_booking_by_user() {
    let store = get_test_store().await;
    let hotel_id = create_hotel(store.pool()).await;
    let room_id = create_room(store.pool(), hotel_id, 3).await;

    let booking = store.insert(UserId::new(1), room_id).await.unwrap();
    assert_eq!(booking.user_id, UserId::new(1));
    assert_eq!(booking.room_id, room_id);

    let found = store.find_by_user(UserId::new(1)).await.unwrap().unwrap();
    assert_eq!(found.id, booking.id);
    assert_eq!(found.room.id, room_id);
    assert_eq!(found.room.capacity, 3);
    assert_eq!(found.room.name, "101");

    assert!(store.find_by_user(UserId::new(2)).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn find_by_room_counts_occupants() {
    let store = get_test_store().await;
    let hotel_id = create_hotel(store.pool()).await;
    let room_a = create_room(store.pool(), hotel_id, 3).await;
    let room_b = create_room(store.pool(), hotel_id, 3).await;

    store.insert(UserId::new(1), room_a).await.unwrap();
    store.insert(UserId::new(2), room_a).await.unwrap();
    store.insert(UserId::new(3), room_b).await.unwrap();

    assert_eq!(store.find_by_room(room_a).await.unwrap().len(), 2);
    assert_eq!(store.find_by_room(room_b).await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn update_room_moves_booking() {
    let store = get_test_store().await;
    let hotel_id = create_hotel(store.pool()).await;
    let room_a = create_room(store.pool(), hotel_id, 3).await;
    let room_b = create_room(store.pool(), hotel_id, 3).await;

    let booking = store.insert(UserId::new(1), room_a).await.unwrap();
    let updated = store.update_room(booking.id, room_b).await.unwrap();

    assert_eq!(updated.id, booking.id);
    assert_eq!(updated.room_id, room_b);
    assert!(updated.updated_at >= booking.updated_at);

    let found = store.find_by_user(UserId::new(1)).await.unwrap().unwrap();
    assert_eq!(found.room.id, room_b);
}

#[tokio::test]
#[serial]
async fn update_room_of_missing_booking_fails() {
    let store = get_test_store().await;
    let hotel_id = create_hotel(store.pool()).await;
    let room_id = create_room(store.pool(), hotel_id, 1).await;

    let result = store.update_room(BookingId::new(404), room_id).await;
    assert!(matches!(result, Err(StoreError::BookingNotFound(_))));
}

#[tokio::test]
#[serial]
async fn find_room_returns_none_for_unknown_id() {
    let store = get_test_store().await;
    assert!(store.find_room(RoomId::new(1)).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn enrollment_and_ticket_lookups() {
    let store = get_test_store().await;
    let enrollment_id = create_ticket(store.pool(), UserId::new(5), "PAID", false, true).await;

    let enrollment = store
        .find_enrollment_by_user(UserId::new(5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(enrollment.id, enrollment_id);

    let ticket = store
        .find_ticket_by_enrollment(enrollment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Paid);
    assert!(!ticket.ticket_type.is_remote);
    assert!(ticket.ticket_type.includes_hotel);

    assert!(
        store
            .find_enrollment_by_user(UserId::new(6))
            .await
            .unwrap()
            .is_none()
    );
}
