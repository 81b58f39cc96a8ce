use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for adoption operations
#[derive(Debug, thiserror::Error)]
pub enum AdoptionError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Application not found")]
    NotFound,

    #[error("Member not found: {0}")]
    MemberNotFound(i32),

    #[error("Pet not found: {0}")]
    PetNotFound(i32),

    #[error("Staff member not found: {0}")]
    StaffNotFound(i32),

    #[error("Application is not approved")]
    NotApproved,

    #[error("Application is already withdrawn")]
    AlreadyWithdrawn,

    #[error("An adoption is already recorded for this application")]
    AlreadyRecorded,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for AdoptionError {
    fn from(err: sqlx::Error) -> Self {
        AdoptionError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for AdoptionError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AdoptionError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AdoptionError::NotFound => (StatusCode::NOT_FOUND, "Application not found".to_string()),
            AdoptionError::MemberNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Member with id {} not found", id),
            ),
            AdoptionError::PetNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Pet with id {} not found", id),
            ),
            AdoptionError::StaffNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Staff member with id {} not found", id),
            ),
            AdoptionError::NotApproved => (
                StatusCode::CONFLICT,
                "Application must be approved before recording an adoption".to_string(),
            ),
            AdoptionError::AlreadyWithdrawn => (
                StatusCode::CONFLICT,
                "Application is already withdrawn".to_string(),
            ),
            AdoptionError::AlreadyRecorded => (
                StatusCode::CONFLICT,
                "An adoption is already recorded for this application".to_string(),
            ),
            AdoptionError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            AdoptionError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
