use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status of a resident pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetStatus {
    Available,
    InCare,
    AvailableForAdoption,
    Adopted,
    Deceased,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "AVAILABLE",
            PetStatus::InCare => "IN_CARE",
            PetStatus::AvailableForAdoption => "AVAILABLE_FOR_ADOPTION",
            PetStatus::Adopted => "ADOPTED",
            PetStatus::Deceased => "DECEASED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(PetStatus::Available),
            "IN_CARE" => Some(PetStatus::InCare),
            "AVAILABLE_FOR_ADOPTION" => Some(PetStatus::AvailableForAdoption),
            "ADOPTED" => Some(PetStatus::Adopted),
            "DECEASED" => Some(PetStatus::Deceased),
            _ => None,
        }
    }

    /// Whether a pet in this status has left the cafe's care
    pub fn is_departed(&self) -> bool {
        matches!(self, PetStatus::Adopted | PetStatus::Deceased)
    }
}

impl std::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for PetStatus {
    fn default() -> Self {
        PetStatus::Available
    }
}

/// Status of a health record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthRecordStatus {
    Active,
    Resolved,
}

impl HealthRecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthRecordStatus::Active => "ACTIVE",
            HealthRecordStatus::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for HealthRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for HealthRecordStatus {
    fn default() -> Self {
        HealthRecordStatus::Active
    }
}

/// A resident pet
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pet {
    pub pet_id: i32,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: PetStatus,
}

/// A veterinary record attached to a pet
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HealthRecord {
    pub record_id: i32,
    pub pet_id: i32,
    pub record_type: String,
    pub description: Option<String>,
    pub record_date: NaiveDate,
    pub next_due_date: Option<NaiveDate>,
    pub status: HealthRecordStatus,
}

/// Request to register a pet
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePetRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Species must be 1-50 characters"))]
    pub species: String,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Request to update a pet; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePetRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub breed: Option<String>,
    pub status: Option<PetStatus>,
}

/// Request to attach a health record to a pet
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHealthRecordRequest {
    #[validate(length(min = 1, max = 50, message = "Record type must be 1-50 characters"))]
    pub record_type: String,
    pub description: Option<String>,
    pub next_due_date: Option<NaiveDate>,
}

/// Request to update a health record
#[derive(Debug, Deserialize)]
pub struct UpdateHealthRecordRequest {
    pub status: Option<HealthRecordStatus>,
    pub next_due_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_status_round_trip() {
        for status in [
            PetStatus::Available,
            PetStatus::InCare,
            PetStatus::AvailableForAdoption,
            PetStatus::Adopted,
            PetStatus::Deceased,
        ] {
            assert_eq!(PetStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(PetStatus::from_str("LOST"), None);
    }

    #[test]
    fn test_departed_statuses() {
        assert!(PetStatus::Adopted.is_departed());
        assert!(PetStatus::Deceased.is_departed());
        assert!(!PetStatus::Available.is_departed());
        assert!(!PetStatus::InCare.is_departed());
        assert!(!PetStatus::AvailableForAdoption.is_departed());
    }

    #[test]
    fn test_create_pet_requires_species() {
        let request = CreatePetRequest {
            name: "Mochi".to_string(),
            species: "".to_string(),
            breed: None,
            date_of_birth: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_pet_status_serialization() {
        assert_eq!(
            serde_json::to_value(PetStatus::AvailableForAdoption).unwrap(),
            "AVAILABLE_FOR_ADOPTION"
        );
    }
}
