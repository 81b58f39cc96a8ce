use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::{validate_discount_rate, validate_positive_price};

/// A membership tier conferring a percentage discount on order totals
///
/// Static reference data: the rate is snapshotted into orders at finalize
/// time and into reservations at booking time, so later edits here do not
/// rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipTier {
    pub tier_id: i32,
    pub tier_name: String,
    /// Percent discount, 0-100
    pub discount_rate: Decimal,
}

/// A cafe room that reservations and events are booked into
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub room_id: i32,
    pub name: String,
    pub max_capacity: i32,
}

/// A staff member (adoption coordinator, event host, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Staff {
    pub staff_id: i32,
    pub name: String,
    pub role: String,
}

/// A purchasable item on the cafe menu
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub item_id: i32,
    pub name: String,
    pub category: Option<String>,
    pub base_price: Decimal,
}

/// Request DTO for creating a menu item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMenuItem {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(custom = "validate_positive_price")]
    pub base_price: Decimal,
}

/// Request DTO for updating a menu item; omitted fields keep current values
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateMenuItem {
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(custom = "validate_positive_price")]
    pub base_price: Option<Decimal>,
}

/// Request DTO for creating a membership tier
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMembershipTier {
    #[validate(length(min = 1, message = "Tier name must not be empty"))]
    pub tier_name: String,
    #[validate(custom = "validate_discount_rate")]
    pub discount_rate: Decimal,
}

/// Request DTO for creating a room
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub max_capacity: i32,
}

/// Request DTO for creating a staff member
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStaff {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Role must not be empty"))]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// MenuItem round-trips through JSON with decimal prices intact
    #[test]
    fn test_menu_item_serialization() {
        let item = MenuItem {
            item_id: 1,
            name: "Oat Latte".to_string(),
            category: Some("drinks".to_string()),
            base_price: dec!(4.50),
        };

        let json = serde_json::to_string(&item).expect("Failed to serialize MenuItem");
        assert!(json.contains("\"item_id\":1"));
        assert!(json.contains("\"name\":\"Oat Latte\""));
        assert!(json.contains("\"base_price\":\"4.50\""));
    }

    #[test]
    fn test_create_menu_item_deserialization() {
        let json = r#"{
            "name": "Puppuccino",
            "category": "pet treats",
            "base_price": "2.00"
        }"#;

        let create: CreateMenuItem =
            serde_json::from_str(json).expect("Failed to deserialize CreateMenuItem");

        assert_eq!(create.name, "Puppuccino");
        assert_eq!(create.category.as_deref(), Some("pet treats"));
        assert_eq!(create.base_price, dec!(2.00));
    }

    #[test]
    fn test_create_menu_item_validation() {
        let valid = CreateMenuItem {
            name: "Espresso".to_string(),
            category: None,
            base_price: dec!(3.00),
        };
        assert!(valid.validate().is_ok());

        let bad_price = CreateMenuItem {
            name: "Espresso".to_string(),
            category: None,
            base_price: dec!(0),
        };
        assert!(bad_price.validate().is_err());
    }

    #[test]
    fn test_update_menu_item_partial_fields() {
        let json = r#"{ "base_price": "5.25" }"#;

        let update: UpdateMenuItem =
            serde_json::from_str(json).expect("Failed to deserialize UpdateMenuItem");

        assert_eq!(update.base_price, Some(dec!(5.25)));
        assert_eq!(update.name, None);
        assert_eq!(update.category, None);
    }

    #[test]
    fn test_create_tier_validation() {
        let over = CreateMembershipTier {
            tier_name: "Platinum".to_string(),
            discount_rate: dec!(120),
        };
        assert!(over.validate().is_err());

        let ok = CreateMembershipTier {
            tier_name: "Gold".to_string(),
            discount_rate: dec!(15),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_create_room_validation() {
        let bad = CreateRoom {
            name: "Cat Lounge".to_string(),
            max_capacity: 0,
        };
        assert!(bad.validate().is_err());
    }
}
