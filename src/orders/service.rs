use uuid::Uuid;

use crate::orders::{
    AddOrderItemRequest, CreateOrderRequest, Order, OrderError, OrderItem, OrderWithItems,
    OrdersRepository,
};

/// Service for order business logic
#[derive(Clone)]
pub struct OrderService {
    repo: OrdersRepository,
}

impl OrderService {
    /// Create a new OrderService
    pub fn new(repo: OrdersRepository) -> Self {
        Self { repo }
    }

    /// Open a new order for a member
    pub async fn create(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        let order = self
            .repo
            .create(request.member_id, request.reservation_id)
            .await?;

        tracing::info!(
            "Created order {} for member {}",
            order.order_id,
            order.member_id
        );

        Ok(order)
    }

    /// Add a line to an order
    pub async fn add_item(
        &self,
        order_id: Uuid,
        request: AddOrderItemRequest,
    ) -> Result<OrderItem, OrderError> {
        if request.quantity < 1 {
            return Err(OrderError::ValidationError(format!(
                "Quantity must be at least 1, got {}",
                request.quantity
            )));
        }

        let item = self
            .repo
            .add_item(order_id, request.item_id, request.quantity)
            .await?;

        tracing::info!(
            "Added {} x item {} to order {}",
            item.quantity,
            item.item_id,
            order_id
        );

        Ok(item)
    }

    /// Finalize an order: recompute the discounted total and set the
    /// order back to UNPAID
    pub async fn finalize(&self, order_id: Uuid) -> Result<Order, OrderError> {
        let order = self.repo.finalize(order_id).await?;

        tracing::info!(
            "Finalized order {} at total {}",
            order.order_id,
            order.total_price
        );

        Ok(order)
    }

    /// Mark an order as paid
    pub async fn mark_paid(&self, order_id: Uuid) -> Result<Order, OrderError> {
        let order = self.repo.mark_paid(order_id).await?;
        tracing::info!("Marked order {} as paid", order.order_id);
        Ok(order)
    }

    /// Delete an unpaid order together with its lines
    pub async fn delete(&self, order_id: Uuid) -> Result<(), OrderError> {
        self.repo.delete(order_id).await?;
        tracing::info!("Deleted order {}", order_id);
        Ok(())
    }

    /// Get an order with its lines
    pub async fn get_with_items(&self, order_id: Uuid) -> Result<OrderWithItems, OrderError> {
        let order = self
            .repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;
        let items = self.repo.items_by_order(order_id).await?;

        Ok(OrderWithItems { order, items })
    }

    /// List a member's orders
    pub async fn list_by_member(&self, member_id: i32) -> Result<Vec<Order>, OrderError> {
        self.repo.list_by_member(member_id).await
    }
}
