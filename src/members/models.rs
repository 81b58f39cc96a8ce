use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A cafe member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub member_id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub emergency_contact: Option<String>,
    pub tier_id: Option<i32>,
}

/// Request to register a member
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub emergency_contact: Option<String>,
    pub tier_id: Option<i32>,
}

/// Request to update a member; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub emergency_contact: Option<String>,
    pub tier_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_member_requires_name() {
        let request = CreateMemberRequest {
            name: "".to_string(),
            phone: None,
            email: None,
            date_of_birth: None,
            emergency_contact: None,
            tier_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_member_rejects_bad_email() {
        let request = CreateMemberRequest {
            name: "Ada".to_string(),
            phone: None,
            email: Some("not-an-email".to_string()),
            date_of_birth: None,
            emergency_contact: None,
            tier_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_member_valid() {
        let request = CreateMemberRequest {
            name: "Ada".to_string(),
            phone: Some("555-0100".to_string()),
            email: Some("ada@example.com".to_string()),
            date_of_birth: None,
            emergency_contact: None,
            tier_id: Some(1),
        };
        assert!(request.validate().is_ok());
    }
}
