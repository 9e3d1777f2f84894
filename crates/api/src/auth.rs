//! Identification of the calling user.
//!
//! Token and session validation happen upstream; the gateway forwards the
//! authenticated user id in the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use store::UserId;

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing user identity".to_string()))?;

        value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(UserId::positive)
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("Invalid user identity".to_string()))
    }
}
