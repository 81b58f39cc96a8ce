// HTTP handlers for order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::orders::{
    AddOrderItemRequest, CreateOrderRequest, Order, OrderError, OrderItem, OrderWithItems,
};

/// Handler for POST /api/orders
/// Opens a new unpaid order
pub async fn create_order_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let order = state.order_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Handler for POST /api/orders/{id}/items
/// Adds a line with a price snapshot
pub async fn add_order_item_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<AddOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItem>), OrderError> {
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let item = state.order_service.add_item(order_id, request).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for POST /api/orders/{id}/finalize
/// Recomputes the discounted total; safe to repeat
pub async fn finalize_order_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, OrderError> {
    let order = state.order_service.finalize(order_id).await?;
    Ok(Json(order))
}

/// Handler for POST /api/orders/{id}/pay
pub async fn pay_order_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, OrderError> {
    let order = state.order_service.mark_paid(order_id).await?;
    Ok(Json(order))
}

/// Handler for GET /api/orders/{id}
/// Returns the order with its lines
pub async fn get_order_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderWithItems>, OrderError> {
    let order = state.order_service.get_with_items(order_id).await?;
    Ok(Json(order))
}

/// Handler for GET /api/members/{id}/orders
pub async fn list_member_orders_handler(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> Result<Json<Vec<Order>>, OrderError> {
    let orders = state.order_service.list_by_member(member_id).await?;
    Ok(Json(orders))
}

/// Handler for DELETE /api/orders/{id}
/// Only unpaid orders can be removed
pub async fn delete_order_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, OrderError> {
    state.order_service.delete(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
