// HTTP handlers for adoption endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::adoptions::{
    Adoption, AdoptionApplication, AdoptionError, ApplicationRemoval, RecordAdoptionRequest,
    ReviewApplicationRequest, SubmitApplicationRequest,
};

/// Handler for POST /api/adoptions/applications
pub async fn submit_application_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<AdoptionApplication>), AdoptionError> {
    request
        .validate()
        .map_err(|e| AdoptionError::ValidationError(e.to_string()))?;

    let application = state.adoption_service.submit(request).await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// Handler for GET /api/adoptions/applications
pub async fn list_applications_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<AdoptionApplication>>, AdoptionError> {
    let applications = state.adoption_service.list().await?;
    Ok(Json(applications))
}

/// Handler for GET /api/adoptions/applications/{id}
pub async fn get_application_handler(
    State(state): State<crate::AppState>,
    Path(application_id): Path<i32>,
) -> Result<Json<AdoptionApplication>, AdoptionError> {
    let application = state.adoption_service.get_by_id(application_id).await?;
    Ok(Json(application))
}

/// Handler for PATCH /api/adoptions/applications/{id}/review
/// Applies a review decision; transitions are validated
pub async fn review_application_handler(
    State(state): State<crate::AppState>,
    Path(application_id): Path<i32>,
    Json(request): Json<ReviewApplicationRequest>,
) -> Result<Json<AdoptionApplication>, AdoptionError> {
    let application = state
        .adoption_service
        .review(application_id, request)
        .await?;

    Ok(Json(application))
}

/// Handler for DELETE /api/adoptions/applications/{id}
/// Deletes an unreviewed application, withdraws a reviewed one
pub async fn remove_application_handler(
    State(state): State<crate::AppState>,
    Path(application_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AdoptionError> {
    let outcome = state.adoption_service.remove(application_id).await?;

    let message = match outcome {
        ApplicationRemoval::Deleted => "Application deleted",
        ApplicationRemoval::Withdrawn => "Application withdrawn",
    };

    Ok(Json(json!({
        "outcome": outcome,
        "message": message,
    })))
}

/// Handler for POST /api/adoptions
/// Records a completed adoption and marks the pet as adopted
pub async fn record_adoption_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<RecordAdoptionRequest>,
) -> Result<(StatusCode, Json<Adoption>), AdoptionError> {
    request
        .validate()
        .map_err(|e| AdoptionError::ValidationError(e.to_string()))?;

    let adoption = state.adoption_service.record_adoption(request).await?;

    Ok((StatusCode::CREATED, Json(adoption)))
}

/// Handler for GET /api/adoptions
pub async fn list_adoptions_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Adoption>>, AdoptionError> {
    let adoptions = state.adoption_service.list_adoptions().await?;
    Ok(Json(adoptions))
}
