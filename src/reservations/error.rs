use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for reservation operations
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Reservation not found")]
    NotFound,

    #[error("Member not found: {0}")]
    MemberNotFound(i32),

    #[error("Room not found: {0}")]
    RoomNotFound(i32),

    #[error("Room is at capacity for that time")]
    CapacityExceeded,

    #[error("Cannot cancel a reservation that has already started")]
    AlreadyStarted,

    #[error("Cannot cancel: orders exist for this reservation")]
    HasOrders,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for ReservationError {
    fn from(err: sqlx::Error) -> Self {
        ReservationError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ReservationError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ReservationError::NotFound => {
                (StatusCode::NOT_FOUND, "Reservation not found".to_string())
            }
            ReservationError::MemberNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Member with id {} not found", id),
            ),
            ReservationError::RoomNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Room with id {} not found", id),
            ),
            ReservationError::CapacityExceeded => (
                StatusCode::CONFLICT,
                "Room is at capacity for that time".to_string(),
            ),
            ReservationError::AlreadyStarted => (
                StatusCode::CONFLICT,
                "Cannot cancel a past or ongoing reservation".to_string(),
            ),
            ReservationError::HasOrders => (
                StatusCode::CONFLICT,
                "Cannot cancel: orders exist for this reservation".to_string(),
            ),
            ReservationError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            ReservationError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
