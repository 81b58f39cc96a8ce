// HTTP handlers for event endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::events::{
    CreateEventRequest, Event, EventError, EventRegistration, RegisterForEventRequest,
    RegistrationRemoval, UpdateAttendanceRequest, UpdateRegistrationPaymentRequest,
};

/// Handler for POST /api/events
pub async fn create_event_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), EventError> {
    request
        .validate()
        .map_err(|e| EventError::ValidationError(e.to_string()))?;

    let event = state.event_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Handler for GET /api/events
pub async fn list_events_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Event>>, EventError> {
    let events = state.event_service.list().await?;
    Ok(Json(events))
}

/// Handler for GET /api/events/{id}
pub async fn get_event_handler(
    State(state): State<crate::AppState>,
    Path(event_id): Path<i32>,
) -> Result<Json<Event>, EventError> {
    let event = state.event_service.get_by_id(event_id).await?;
    Ok(Json(event))
}

/// Handler for POST /api/events/{id}/registrations
/// Registers a member, holding the capacity limit under concurrency
pub async fn register_for_event_handler(
    State(state): State<crate::AppState>,
    Path(event_id): Path<i32>,
    Json(request): Json<RegisterForEventRequest>,
) -> Result<(StatusCode, Json<EventRegistration>), EventError> {
    let registration = state
        .event_service
        .register(event_id, request.member_id)
        .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// Handler for GET /api/events/{id}/registrations
pub async fn list_event_registrations_handler(
    State(state): State<crate::AppState>,
    Path(event_id): Path<i32>,
) -> Result<Json<Vec<EventRegistration>>, EventError> {
    let registrations = state.event_service.registrations(event_id).await?;
    Ok(Json(registrations))
}

/// Handler for PATCH /api/events/{event_id}/registrations/{member_id}/attendance
pub async fn update_attendance_handler(
    State(state): State<crate::AppState>,
    Path((event_id, member_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> Result<Json<EventRegistration>, EventError> {
    let registration = state
        .event_service
        .update_attendance(event_id, member_id, request.status)
        .await?;

    Ok(Json(registration))
}

/// Handler for PATCH /api/events/{event_id}/registrations/{member_id}/payment
pub async fn update_registration_payment_handler(
    State(state): State<crate::AppState>,
    Path((event_id, member_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateRegistrationPaymentRequest>,
) -> Result<Json<EventRegistration>, EventError> {
    let registration = state
        .event_service
        .update_payment(event_id, member_id, request.status)
        .await?;

    Ok(Json(registration))
}

/// Handler for DELETE /api/events/{event_id}/registrations/{member_id}
/// Deletes a refunded pre-start registration, cancels anything else
pub async fn remove_registration_handler(
    State(state): State<crate::AppState>,
    Path((event_id, member_id)): Path<(i32, i32)>,
) -> Result<Json<serde_json::Value>, EventError> {
    let outcome = state
        .event_service
        .remove_registration(event_id, member_id)
        .await?;

    let message = match outcome {
        RegistrationRemoval::Deleted => "Registration deleted",
        RegistrationRemoval::Cancelled => "Registration cancelled",
    };

    Ok(Json(json!({
        "outcome": outcome,
        "message": message,
    })))
}
