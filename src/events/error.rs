use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for event operations
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Event not found")]
    NotFound,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("Member not found: {0}")]
    MemberNotFound(i32),

    #[error("Room not found: {0}")]
    RoomNotFound(i32),

    #[error("Event is full")]
    CapacityExceeded,

    #[error("Member is already registered for this event")]
    AlreadyRegistered,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for EventError {
    fn from(err: sqlx::Error) -> Self {
        EventError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            EventError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            EventError::NotFound => (StatusCode::NOT_FOUND, "Event not found".to_string()),
            EventError::RegistrationNotFound => {
                (StatusCode::NOT_FOUND, "Registration not found".to_string())
            }
            EventError::MemberNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Member with id {} not found", id),
            ),
            EventError::RoomNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Room with id {} not found", id),
            ),
            EventError::CapacityExceeded => (StatusCode::CONFLICT, "Event is full".to_string()),
            EventError::AlreadyRegistered => (
                StatusCode::CONFLICT,
                "Member is already registered for this event".to_string(),
            ),
            EventError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            EventError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
