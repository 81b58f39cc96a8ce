use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Reservation status enum representing the lifecycle of a room booking
///
/// `Cancelled` never appears in the store: cancelling in advance deletes the
/// row outright, which distinguishes "never happened" from `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Booked,
    InProgress,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "BOOKED",
            ReservationStatus::InProgress => "IN_PROGRESS",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "BOOKED" => Ok(ReservationStatus::Booked),
            "IN_PROGRESS" => Ok(ReservationStatus::InProgress),
            "COMPLETED" => Ok(ReservationStatus::Completed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Booked
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing a room reservation in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub reservation_id: i32,
    pub member_id: i32,
    pub room_id: i32,
    pub reservation_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: ReservationStatus,
    /// Member's tier at booking time; later tier changes do not affect it
    pub tier_id: Option<i32>,
    pub check_out_time: Option<DateTime<Utc>>,
}

/// Request DTO for booking a reservation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookReservationRequest {
    pub member_id: i32,
    pub room_id: i32,
    pub reservation_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    #[validate(range(min = 1, max = 480, message = "Duration must be between 1 and 480 minutes"))]
    pub duration_minutes: i32,
    /// Optional tier snapshot override; defaults to the member's current tier
    pub tier_id: Option<i32>,
}

/// Request DTO for updating a reservation's status
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
    /// Stamp the check-out time with the current instant
    #[serde(default)]
    pub check_out_now: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            ReservationStatus::Booked,
            ReservationStatus::InProgress,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::from_str(s.as_str()), Ok(s));
        }
    }

    #[test]
    fn test_status_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&ReservationStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let parsed: ReservationStatus = serde_json::from_str("\"BOOKED\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Booked);
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        assert!(ReservationStatus::from_str("WAITLISTED").is_err());
    }

    #[test]
    fn test_update_request_check_out_defaults_false() {
        let req: UpdateReservationStatusRequest =
            serde_json::from_str(r#"{ "status": "COMPLETED" }"#).unwrap();
        assert_eq!(req.status, ReservationStatus::Completed);
        assert!(!req.check_out_now);
    }
}
