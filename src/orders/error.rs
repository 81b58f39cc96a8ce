use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Order not found")]
    NotFound,

    #[error("Member not found: {0}")]
    MemberNotFound(i32),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(i32),

    #[error("Menu item not found: {0}")]
    ItemNotFound(i32),

    #[error("Order is not unpaid")]
    NotUnpaid,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            OrderError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            OrderError::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_string()),
            OrderError::MemberNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Member with id {} not found", id),
            ),
            OrderError::ReservationNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Reservation with id {} not found", id),
            ),
            OrderError::ItemNotFound(id) => (
                StatusCode::BAD_REQUEST,
                format!("Menu item with id {} not found", id),
            ),
            OrderError::NotUnpaid => (
                StatusCode::CONFLICT,
                "Order has already been paid".to_string(),
            ),
            OrderError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
