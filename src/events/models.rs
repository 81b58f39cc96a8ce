use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Attendance status of an event registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Registered,
    Attended,
    NoShow,
    Cancelled,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Registered => "REGISTERED",
            AttendanceStatus::Attended => "ATTENDED",
            AttendanceStatus::NoShow => "NO_SHOW",
            AttendanceStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "REGISTERED" => Some(AttendanceStatus::Registered),
            "ATTENDED" => Some(AttendanceStatus::Attended),
            "NO_SHOW" => Some(AttendanceStatus::NoShow),
            "CANCELLED" => Some(AttendanceStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        AttendanceStatus::Registered
    }
}

/// Payment status of an event registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationPaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl RegistrationPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationPaymentStatus::Unpaid => "UNPAID",
            RegistrationPaymentStatus::Paid => "PAID",
            RegistrationPaymentStatus::Refunded => "REFUNDED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UNPAID" => Some(RegistrationPaymentStatus::Unpaid),
            "PAID" => Some(RegistrationPaymentStatus::Paid),
            "REFUNDED" => Some(RegistrationPaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistrationPaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for RegistrationPaymentStatus {
    fn default() -> Self {
        RegistrationPaymentStatus::Unpaid
    }
}

/// A scheduled cafe event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub event_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub room_id: i32,
    pub event_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_attendees: i32,
    pub event_type: Option<String>,
    pub staff_id: Option<i32>,
}

/// A member's registration for an event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRegistration {
    pub member_id: i32,
    pub event_id: i32,
    pub registration_date: NaiveDate,
    pub attendance_status: AttendanceStatus,
    pub payment_status: RegistrationPaymentStatus,
}

/// Request to schedule an event
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub room_id: i32,
    pub event_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(range(min = 1, message = "Max attendees must be at least 1"))]
    pub max_attendees: i32,
    pub event_type: Option<String>,
    pub staff_id: Option<i32>,
}

/// Request to register a member for an event
#[derive(Debug, Deserialize)]
pub struct RegisterForEventRequest {
    pub member_id: i32,
}

/// Request to update a registration's attendance status
#[derive(Debug, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: AttendanceStatus,
}

/// Request to update a registration's payment status
#[derive(Debug, Deserialize)]
pub struct UpdateRegistrationPaymentRequest {
    pub status: RegistrationPaymentStatus,
}

/// What removing a registration actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationRemoval {
    Deleted,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_round_trip() {
        for status in [
            AttendanceStatus::Registered,
            AttendanceStatus::Attended,
            AttendanceStatus::NoShow,
            AttendanceStatus::Cancelled,
        ] {
            assert_eq!(AttendanceStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::from_str("MAYBE"), None);
    }

    #[test]
    fn test_registration_payment_round_trip() {
        for status in [
            RegistrationPaymentStatus::Unpaid,
            RegistrationPaymentStatus::Paid,
            RegistrationPaymentStatus::Refunded,
        ] {
            assert_eq!(
                RegistrationPaymentStatus::from_str(status.as_str()),
                Some(status)
            );
        }
    }

    #[test]
    fn test_create_event_requires_positive_capacity() {
        let request = CreateEventRequest {
            title: "Kitten Yoga".to_string(),
            description: None,
            room_id: 1,
            event_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            start_time: Utc::now(),
            end_time: Utc::now(),
            max_attendees: 0,
            event_type: None,
            staff_id: None,
        };
        assert!(request.validate().is_err());
    }
}
