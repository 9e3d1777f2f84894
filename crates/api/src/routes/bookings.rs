//! Booking endpoints for the authenticated user.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use chrono::{DateTime, SecondsFormat, Utc};
use common::{BookingId, RoomId};
use domain::{BookingService, ChangeBookingRoom, CreateBooking};
use serde::{Deserialize, Serialize};
use store::{BookingWithRoom, Repository, Room};

use crate::auth::AuthUser;
use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: Repository> {
    pub booking_service: BookingService<S>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub room_id: i64,
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i32,
    #[serde(rename = "Room")]
    pub room: RoomResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: i32,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.as_i32(),
            name: room.name,
            capacity: room.capacity,
            hotel_id: room.hotel_id.as_i32(),
            created_at: timestamp(room.created_at),
            updated_at: timestamp(room.updated_at),
        }
    }
}

impl From<BookingWithRoom> for BookingResponse {
    fn from(booking: BookingWithRoom) -> Self {
        Self {
            id: booking.id.as_i32(),
            room: booking.room.into(),
        }
    }
}

// -- Handlers --

/// GET /booking: the caller's booking with its room.
#[tracing::instrument(skip(state))]
pub async fn get<S: Repository + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.booking_service.get_booking(user_id).await?;
    Ok(Json(booking.into()))
}

/// POST /booking: book a room for the caller.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: Repository + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<Json<BookingIdResponse>, ApiError> {
    let room_id = parse_room_request(body)?;

    let confirmation = state
        .booking_service
        .create_booking(CreateBooking::new(user_id, room_id))
        .await?;

    Ok(Json(BookingIdResponse {
        booking_id: confirmation.booking_id.as_i32(),
    }))
}

/// PUT /booking/{bookingId}: move the caller's booking to another room.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: Repository + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    Path(booking_id): Path<String>,
    body: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<Json<BookingIdResponse>, ApiError> {
    let room_id = parse_room_request(body)?;
    let booking_id = parse_booking_id(&booking_id)?;

    let confirmation = state
        .booking_service
        .change_room(ChangeBookingRoom::new(user_id, room_id, booking_id))
        .await?;

    Ok(Json(BookingIdResponse {
        booking_id: confirmation.booking_id.as_i32(),
    }))
}

fn parse_room_request(body: Result<Json<RoomRequest>, JsonRejection>) -> Result<RoomId, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    RoomId::positive(req.room_id)
        .ok_or_else(|| ApiError::BadRequest("roomId must be a positive integer".to_string()))
}

fn parse_booking_id(raw: &str) -> Result<BookingId, ApiError> {
    raw.parse::<i64>()
        .ok()
        .and_then(BookingId::positive)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid booking id: {raw}")))
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use store::HotelId;

    use super::*;

    #[test]
    fn test_booking_response_shape() {
        let room = Room::new(RoomId::new(15), HotelId::new(3), "Quarto 01", 2);
        let response = BookingResponse::from(BookingWithRoom {
            id: BookingId::new(2),
            room,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["Room"]["id"], 15);
        assert_eq!(json["Room"]["name"], "Quarto 01");
        assert_eq!(json["Room"]["capacity"], 2);
        assert_eq!(json["Room"]["hotelId"], 3);
        assert!(json["Room"]["createdAt"].as_str().unwrap().ends_with('Z'));
        assert!(json["Room"]["updatedAt"].is_string());
    }

    #[test]
    fn test_booking_id_response_is_camel_case() {
        let json = serde_json::to_value(BookingIdResponse { booking_id: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({ "bookingId": 7 }));
    }

    #[test]
    fn test_parse_booking_id() {
        assert_eq!(parse_booking_id("12").unwrap(), BookingId::new(12));
        assert!(parse_booking_id("0").is_err());
        assert!(parse_booking_id("-4").is_err());
        assert!(parse_booking_id("abc").is_err());
    }
}
