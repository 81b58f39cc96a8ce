use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Paid => "PAID",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UNPAID" => Some(PaymentStatus::Unpaid),
            "PAID" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

/// An order placed by a member, optionally tied to a reservation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub order_id: Uuid,
    pub member_id: i32,
    pub reservation_id: Option<i32>,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub ordered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line on an order; unit_price is the menu price captured when the
/// line was added, not a live reference
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Request to open a new order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub member_id: i32,
    pub reservation_id: Option<i32>,
}

/// Request to add a line to an order
#[derive(Debug, Deserialize, Validate)]
pub struct AddOrderItemRequest {
    pub item_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// An order together with its lines
#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_status_round_trip() {
        assert_eq!(PaymentStatus::from_str("UNPAID"), Some(PaymentStatus::Unpaid));
        assert_eq!(PaymentStatus::from_str("PAID"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::from_str("REFUNDED"), None);
        assert_eq!(PaymentStatus::Unpaid.as_str(), "UNPAID");
    }

    #[test]
    fn test_payment_status_default_is_unpaid() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_add_item_request_rejects_zero_quantity() {
        let request = AddOrderItemRequest {
            item_id: 1,
            quantity: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_add_item_request_accepts_positive_quantity() {
        let request = AddOrderItemRequest {
            item_id: 1,
            quantity: 3,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_order_serializes_price_as_string() {
        let order = Order {
            order_id: Uuid::nil(),
            member_id: 1,
            reservation_id: None,
            total_price: dec!(31.50),
            payment_status: PaymentStatus::Unpaid,
            ordered_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["total_price"], "31.50");
        assert_eq!(json["payment_status"], "UNPAID");
    }
}
