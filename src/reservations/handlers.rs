// HTTP handlers for reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::reservations::{
    BookReservationRequest, Reservation, ReservationError, UpdateReservationStatusRequest,
};

/// Handler for POST /api/reservations
/// Books a room reservation, enforcing the capacity/overlap rule
pub async fn book_reservation_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<BookReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ReservationError> {
    request
        .validate()
        .map_err(|e| ReservationError::ValidationError(e.to_string()))?;

    let reservation = state.reservation_service.book(request).await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Handler for GET /api/reservations
/// Lists all reservations
pub async fn list_reservations_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Reservation>>, ReservationError> {
    let reservations = state.reservation_service.list().await?;
    Ok(Json(reservations))
}

/// Handler for GET /api/reservations/{id}
pub async fn get_reservation_handler(
    State(state): State<crate::AppState>,
    Path(reservation_id): Path<i32>,
) -> Result<Json<Reservation>, ReservationError> {
    let reservation = state.reservation_service.get_by_id(reservation_id).await?;
    Ok(Json(reservation))
}

/// Handler for PATCH /api/reservations/{id}/status
/// Updates status (check-in / check-out); transitions are validated
pub async fn update_reservation_status_handler(
    State(state): State<crate::AppState>,
    Path(reservation_id): Path<i32>,
    Json(request): Json<UpdateReservationStatusRequest>,
) -> Result<Json<Reservation>, ReservationError> {
    let reservation = state
        .reservation_service
        .update_status(reservation_id, request.status, request.check_out_now)
        .await?;

    Ok(Json(reservation))
}

/// Handler for DELETE /api/reservations/{id}
/// Cancels a reservation in advance (hard delete)
pub async fn cancel_reservation_handler(
    State(state): State<crate::AppState>,
    Path(reservation_id): Path<i32>,
) -> Result<StatusCode, ReservationError> {
    state.reservation_service.cancel(reservation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
