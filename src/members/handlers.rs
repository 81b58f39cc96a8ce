// HTTP handlers for member endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::members::{CreateMemberRequest, Member, MemberError, UpdateMemberRequest};

/// Handler for POST /api/members
pub async fn create_member_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>), MemberError> {
    request
        .validate()
        .map_err(|e| MemberError::ValidationError(e.to_string()))?;

    let member = state.member_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// Handler for GET /api/members
pub async fn list_members_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Member>>, MemberError> {
    let members = state.member_service.list().await?;
    Ok(Json(members))
}

/// Handler for GET /api/members/{id}
pub async fn get_member_handler(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> Result<Json<Member>, MemberError> {
    let member = state.member_service.get_by_id(member_id).await?;
    Ok(Json(member))
}

/// Handler for PUT /api/members/{id}
pub async fn update_member_handler(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<Member>, MemberError> {
    request
        .validate()
        .map_err(|e| MemberError::ValidationError(e.to_string()))?;

    let member = state.member_service.update(member_id, request).await?;

    Ok(Json(member))
}

/// Handler for DELETE /api/members/{id}
/// Refused while the member has active reservations, pending
/// applications or unpaid orders
pub async fn delete_member_handler(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> Result<StatusCode, MemberError> {
    state.member_service.delete(member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
