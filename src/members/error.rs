use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for member operations
#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Member not found")]
    NotFound,

    #[error("Membership tier not found: {0}")]
    TierNotFound(i32),

    #[error("Member has active reservations")]
    HasActiveReservations,

    #[error("Member has pending adoption applications")]
    HasPendingApplications,

    #[error("Member has unpaid orders")]
    HasUnpaidOrders,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for MemberError {
    fn from(err: sqlx::Error) -> Self {
        MemberError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for MemberError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            MemberError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            MemberError::NotFound => (StatusCode::NOT_FOUND, "Member not found".to_string()),
            MemberError::TierNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Membership tier with id {} not found", id),
            ),
            MemberError::HasActiveReservations => (
                StatusCode::CONFLICT,
                "Cannot delete member with active reservations".to_string(),
            ),
            MemberError::HasPendingApplications => (
                StatusCode::CONFLICT,
                "Cannot delete member with pending adoption applications".to_string(),
            ),
            MemberError::HasUnpaidOrders => (
                StatusCode::CONFLICT,
                "Cannot delete member with unpaid orders".to_string(),
            ),
            MemberError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
