// HTTP handlers for pet and health record endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::pets::{
    CreateHealthRecordRequest, CreatePetRequest, HealthRecord, Pet, PetError,
    UpdateHealthRecordRequest, UpdatePetRequest,
};

/// Handler for POST /api/pets
pub async fn create_pet_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<Pet>), PetError> {
    request
        .validate()
        .map_err(|e| PetError::ValidationError(e.to_string()))?;

    let pet = state.pet_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(pet)))
}

/// Handler for GET /api/pets
pub async fn list_pets_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Pet>>, PetError> {
    let pets = state.pet_service.list().await?;
    Ok(Json(pets))
}

/// Handler for GET /api/pets/{id}
pub async fn get_pet_handler(
    State(state): State<crate::AppState>,
    Path(pet_id): Path<i32>,
) -> Result<Json<Pet>, PetError> {
    let pet = state.pet_service.get_by_id(pet_id).await?;
    Ok(Json(pet))
}

/// Handler for PUT /api/pets/{id}
pub async fn update_pet_handler(
    State(state): State<crate::AppState>,
    Path(pet_id): Path<i32>,
    Json(request): Json<UpdatePetRequest>,
) -> Result<Json<Pet>, PetError> {
    request
        .validate()
        .map_err(|e| PetError::ValidationError(e.to_string()))?;

    let pet = state.pet_service.update(pet_id, request).await?;

    Ok(Json(pet))
}

/// Handler for DELETE /api/pets/{id}
/// Only departed pets with no open records can be removed
pub async fn delete_pet_handler(
    State(state): State<crate::AppState>,
    Path(pet_id): Path<i32>,
) -> Result<StatusCode, PetError> {
    state.pet_service.delete(pet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /api/pets/{id}/health-records
pub async fn create_health_record_handler(
    State(state): State<crate::AppState>,
    Path(pet_id): Path<i32>,
    Json(request): Json<CreateHealthRecordRequest>,
) -> Result<(StatusCode, Json<HealthRecord>), PetError> {
    request
        .validate()
        .map_err(|e| PetError::ValidationError(e.to_string()))?;

    let record = state
        .pet_service
        .create_health_record(pet_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /api/pets/{id}/health-records
pub async fn list_health_records_handler(
    State(state): State<crate::AppState>,
    Path(pet_id): Path<i32>,
) -> Result<Json<Vec<HealthRecord>>, PetError> {
    let records = state.pet_service.health_records(pet_id).await?;
    Ok(Json(records))
}

/// Handler for PATCH /api/health-records/{id}
pub async fn update_health_record_handler(
    State(state): State<crate::AppState>,
    Path(record_id): Path<i32>,
    Json(request): Json<UpdateHealthRecordRequest>,
) -> Result<Json<HealthRecord>, PetError> {
    let record = state
        .pet_service
        .update_health_record(record_id, request)
        .await?;

    Ok(Json(record))
}
