//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The caller could not be identified.
    Unauthorized(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
        DomainError::Store(store_err) => {
            tracing::error!(error = %store_err, "store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use domain::ForbiddenReason;
    use store::{RoomId, StoreError};

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::Domain(DomainError::Forbidden(ForbiddenReason::RoomFull)),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::Domain(DomainError::NotFound {
                    entity: "Room",
                    key: format!("id={}", RoomId::new(3)),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Domain(DomainError::Store(StoreError::InvalidRecord("x".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
