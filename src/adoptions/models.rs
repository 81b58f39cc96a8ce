use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_non_negative_fee;

/// Status of an adoption application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ApplicationStatus::Pending),
            "APPROVED" => Some(ApplicationStatus::Approved),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            "WITHDRAWN" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

/// An application by a member to adopt a pet
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdoptionApplication {
    pub application_id: i32,
    pub member_id: i32,
    pub pet_id: i32,
    pub status: ApplicationStatus,
    pub application_date: NaiveDate,
    pub reviewed_by: i32,
    pub review_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// A completed adoption, created from an approved application
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Adoption {
    pub adoption_id: i32,
    pub application_id: i32,
    pub pet_id: i32,
    pub member_id: i32,
    pub adoption_date: NaiveDate,
    pub adoption_fee: Decimal,
    pub follow_up_schedule: Option<NaiveDate>,
}

/// Request to submit an adoption application
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitApplicationRequest {
    pub member_id: i32,
    pub pet_id: i32,
    pub reviewed_by: i32,
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Request to review an application
#[derive(Debug, Deserialize)]
pub struct ReviewApplicationRequest {
    pub status: ApplicationStatus,
    pub notes: Option<String>,
}

/// Request to record a completed adoption
#[derive(Debug, Deserialize, Validate)]
pub struct RecordAdoptionRequest {
    pub application_id: i32,
    #[validate(custom = "validate_non_negative_fee")]
    pub adoption_fee: Decimal,
    pub follow_up_schedule: Option<NaiveDate>,
}

/// What removing an application actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationRemoval {
    Deleted,
    Withdrawn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert_eq!(ApplicationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::from_str("CLOSED"), None);
    }

    #[test]
    fn test_application_status_default_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn test_record_adoption_rejects_negative_fee() {
        use rust_decimal_macros::dec;

        let request = RecordAdoptionRequest {
            application_id: 1,
            adoption_fee: dec!(-5.00),
            follow_up_schedule: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_record_adoption_accepts_zero_fee() {
        use rust_decimal_macros::dec;

        let request = RecordAdoptionRequest {
            application_id: 1,
            adoption_fee: dec!(0.00),
            follow_up_schedule: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_removal_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(ApplicationRemoval::Deleted).unwrap(),
            "DELETED"
        );
        assert_eq!(
            serde_json::to_value(ApplicationRemoval::Withdrawn).unwrap(),
            "WITHDRAWN"
        );
    }
}
