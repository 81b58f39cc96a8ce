use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::orders::error::OrderError;
use crate::orders::price_calculator::PriceCalculator;
use crate::orders::{Order, OrderItem, PaymentStatus};

/// Repository for order operations
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    /// Create a new OrdersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new UNPAID order with a zero total
    pub async fn create(
        &self,
        member_id: i32,
        reservation_id: Option<i32>,
    ) -> Result<Order, OrderError> {
        let member_exists: Option<i32> =
            sqlx::query_scalar("SELECT member_id FROM member WHERE member_id = $1")
                .bind(member_id)
                .fetch_optional(&self.pool)
                .await?;

        if member_exists.is_none() {
            return Err(OrderError::MemberNotFound(member_id));
        }

        if let Some(res_id) = reservation_id {
            let reservation_exists: Option<i32> = sqlx::query_scalar(
                "SELECT reservation_id FROM reservation WHERE reservation_id = $1",
            )
            .bind(res_id)
            .fetch_optional(&self.pool)
            .await?;

            if reservation_exists.is_none() {
                return Err(OrderError::ReservationNotFound(res_id));
            }
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO customer_order (member_id, reservation_id)
            VALUES ($1, $2)
            RETURNING order_id, member_id, reservation_id, total_price,
                      payment_status, ordered_at, updated_at
            "#,
        )
        .bind(member_id)
        .bind(reservation_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Add a line to an order, snapshotting the menu item's current price
    ///
    /// The order row is locked so a concurrent finalize or delete cannot
    /// interleave.
    pub async fn add_item(
        &self,
        order_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> Result<OrderItem, OrderError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, Uuid>(
            "SELECT order_id FROM customer_order WHERE order_id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::NotFound)?;

        let unit_price: Decimal =
            sqlx::query_scalar("SELECT base_price FROM menu_item WHERE item_id = $1")
                .bind(item_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(OrderError::ItemNotFound(item_id))?;

        let subtotal = PriceCalculator::calculate_subtotal(quantity, unit_price);

        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_item (order_id, item_id, quantity, unit_price, subtotal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING order_item_id, order_id, item_id, quantity, unit_price, subtotal
            "#,
        )
        .bind(order_id)
        .bind(item_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(subtotal)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE customer_order SET updated_at = NOW() WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    /// Finalize an order: recompute the total from the stored line
    /// subtotals, apply the member's current tier discount once, and set
    /// the order back to UNPAID
    ///
    /// Runs as a single transaction with the order row locked; calling it
    /// again recomputes from the same lines and lands on the same total.
    /// Finalizing after more lines were added re-prices the whole bill.
    pub async fn finalize(&self, order_id: Uuid) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let member_id: i32 = sqlx::query_scalar(
            "SELECT member_id FROM customer_order WHERE order_id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::NotFound)?;

        let base_total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(subtotal), 0) FROM order_item WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        // The discount rate is whatever tier the member holds right now,
        // not a snapshot from booking time.
        let discount_rate: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT t.discount_rate
            FROM member m
            JOIN membership_tier t ON t.tier_id = m.tier_id
            WHERE m.member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;

        let total = PriceCalculator::apply_discount(base_total, discount_rate);

        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE customer_order
            SET total_price = $1, payment_status = 'UNPAID', updated_at = NOW()
            WHERE order_id = $2
            RETURNING order_id, member_id, reservation_id, total_price,
                      payment_status, ordered_at, updated_at
            "#,
        )
        .bind(total)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Mark an order as paid
    pub async fn mark_paid(&self, order_id: Uuid) -> Result<Order, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE customer_order
            SET payment_status = 'PAID', updated_at = NOW()
            WHERE order_id = $1
            RETURNING order_id, member_id, reservation_id, total_price,
                      payment_status, ordered_at, updated_at
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderError::NotFound)?;

        Ok(order)
    }

    /// Delete an order and its lines; only UNPAID orders may be deleted
    pub async fn delete(&self, order_id: Uuid) -> Result<(), OrderError> {
        let mut tx = self.pool.begin().await?;

        let payment_status: PaymentStatus = sqlx::query_scalar(
            "SELECT payment_status FROM customer_order WHERE order_id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::NotFound)?;

        if payment_status != PaymentStatus::Unpaid {
            return Err(OrderError::NotUnpaid);
        }

        // Lines go with the order via ON DELETE CASCADE.
        sqlx::query("DELETE FROM customer_order WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, member_id, reservation_id, total_price,
                   payment_status, ordered_at, updated_at
            FROM customer_order
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// List the lines of an order
    pub async fn items_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, OrderError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT order_item_id, order_id, item_id, quantity, unit_price, subtotal
            FROM order_item
            WHERE order_id = $1
            ORDER BY order_item_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// List a member's orders, most recent first
    pub async fn list_by_member(&self, member_id: i32) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, member_id, reservation_id, total_price,
                   payment_status, ordered_at, updated_at
            FROM customer_order
            WHERE member_id = $1
            ORDER BY ordered_at DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}
