use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for pet operations
#[derive(Debug, thiserror::Error)]
pub enum PetError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Pet not found")]
    NotFound,

    #[error("Health record not found")]
    RecordNotFound,

    #[error("Pet is still in the cafe's care")]
    StillInCare,

    #[error("Pet has pending adoption applications")]
    HasPendingApplications,

    #[error("Pet has unresolved health records")]
    HasActiveHealthRecords,

    #[error("Pet has a future adoption follow-up")]
    HasFutureFollowUp,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for PetError {
    fn from(err: sqlx::Error) -> Self {
        PetError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for PetError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            PetError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            PetError::NotFound => (StatusCode::NOT_FOUND, "Pet not found".to_string()),
            PetError::RecordNotFound => {
                (StatusCode::NOT_FOUND, "Health record not found".to_string())
            }
            PetError::StillInCare => (
                StatusCode::CONFLICT,
                "Cannot delete a pet that is still in the cafe's care".to_string(),
            ),
            PetError::HasPendingApplications => (
                StatusCode::CONFLICT,
                "Cannot delete a pet with pending adoption applications".to_string(),
            ),
            PetError::HasActiveHealthRecords => (
                StatusCode::CONFLICT,
                "Cannot delete a pet with unresolved health records".to_string(),
            ),
            PetError::HasFutureFollowUp => (
                StatusCode::CONFLICT,
                "Cannot delete a pet with a future adoption follow-up".to_string(),
            ),
            PetError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
