use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::events::error::EventError;
use crate::events::{
    AttendanceStatus, CreateEventRequest, Event, EventRegistration, RegistrationPaymentStatus,
    RegistrationRemoval, RegistrationStatusMachine,
};

/// Repository for event operations
#[derive(Clone)]
pub struct EventsRepository {
    pool: PgPool,
}

impl EventsRepository {
    /// Create a new EventsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Schedule a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, EventError> {
        let room_exists: Option<i32> =
            sqlx::query_scalar("SELECT room_id FROM room WHERE room_id = $1")
                .bind(request.room_id)
                .fetch_optional(&self.pool)
                .await?;

        if room_exists.is_none() {
            return Err(EventError::RoomNotFound(request.room_id));
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO event
                (title, description, room_id, event_date, start_time, end_time,
                 max_attendees, event_type, staff_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING event_id, title, description, room_id, event_date, start_time,
                      end_time, max_attendees, event_type, staff_id
            "#,
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.room_id)
        .bind(request.event_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.max_attendees)
        .bind(request.event_type)
        .bind(request.staff_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// List all events ordered by date
    pub async fn list(&self) -> Result<Vec<Event>, EventError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, description, room_id, event_date, start_time,
                   end_time, max_attendees, event_type, staff_id
            FROM event
            ORDER BY event_date, start_time
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Find an event by ID
    pub async fn find_by_id(&self, event_id: i32) -> Result<Option<Event>, EventError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, description, room_id, event_date, start_time,
                   end_time, max_attendees, event_type, staff_id
            FROM event
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Register a member for an event with a transactional capacity check
    ///
    /// The event row is locked before counting live registrations, so two
    /// concurrent sign-ups cannot jointly exceed `max_attendees`.
    /// Cancelled registrations do not count against capacity.
    pub async fn register(
        &self,
        event_id: i32,
        member_id: i32,
    ) -> Result<EventRegistration, EventError> {
        let mut tx = self.pool.begin().await?;

        let member_exists: Option<i32> =
            sqlx::query_scalar("SELECT member_id FROM member WHERE member_id = $1")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?;

        if member_exists.is_none() {
            return Err(EventError::MemberNotFound(member_id));
        }

        let max_attendees: i32 =
            sqlx::query_scalar("SELECT max_attendees FROM event WHERE event_id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(EventError::NotFound)?;

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT member_id FROM event_registration WHERE event_id = $1 AND member_id = $2",
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(EventError::AlreadyRegistered);
        }

        let registered: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM event_registration
            WHERE event_id = $1 AND attendance_status != 'CANCELLED'
            "#,
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        if registered >= max_attendees as i64 {
            return Err(EventError::CapacityExceeded);
        }

        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registration (member_id, event_id)
            VALUES ($1, $2)
            RETURNING member_id, event_id, registration_date, attendance_status, payment_status
            "#,
        )
        .bind(member_id)
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(registration)
    }

    /// List an event's registrations
    pub async fn registrations_by_event(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventRegistration>, EventError> {
        let registrations = sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT member_id, event_id, registration_date, attendance_status, payment_status
            FROM event_registration
            WHERE event_id = $1
            ORDER BY registration_date, member_id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Update a registration's attendance status
    ///
    /// The registration row is locked before the transition check, so a
    /// resolved attendance cannot be overwritten by a stale writer.
    pub async fn update_attendance(
        &self,
        event_id: i32,
        member_id: i32,
        new_status: AttendanceStatus,
    ) -> Result<EventRegistration, EventError> {
        let mut tx = self.pool.begin().await?;

        let current: AttendanceStatus = sqlx::query_scalar(
            r#"
            SELECT attendance_status FROM event_registration
            WHERE event_id = $1 AND member_id = $2
            FOR UPDATE
            "#,
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventError::RegistrationNotFound)?;

        RegistrationStatusMachine::attendance_transition(current, new_status)
            .map_err(EventError::InvalidTransition)?;

        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            UPDATE event_registration
            SET attendance_status = $1
            WHERE event_id = $2 AND member_id = $3
            RETURNING member_id, event_id, registration_date, attendance_status, payment_status
            "#,
        )
        .bind(new_status)
        .bind(event_id)
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(registration)
    }

    /// Update a registration's payment status
    ///
    /// Same locked read-validate-write as attendance; payment only walks
    /// forward along its chain.
    pub async fn update_payment(
        &self,
        event_id: i32,
        member_id: i32,
        new_status: RegistrationPaymentStatus,
    ) -> Result<EventRegistration, EventError> {
        let mut tx = self.pool.begin().await?;

        let current: RegistrationPaymentStatus = sqlx::query_scalar(
            r#"
            SELECT payment_status FROM event_registration
            WHERE event_id = $1 AND member_id = $2
            FOR UPDATE
            "#,
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventError::RegistrationNotFound)?;

        RegistrationStatusMachine::payment_transition(current, new_status)
            .map_err(EventError::InvalidTransition)?;

        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            UPDATE event_registration
            SET payment_status = $1
            WHERE event_id = $2 AND member_id = $3
            RETURNING member_id, event_id, registration_date, attendance_status, payment_status
            "#,
        )
        .bind(new_status)
        .bind(event_id)
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(registration)
    }

    /// Remove a registration: delete before the event starts once refunded,
    /// otherwise mark attendance CANCELLED
    ///
    /// The registration row is locked so a concurrent payment update cannot
    /// race the refunded check.
    pub async fn remove_registration(
        &self,
        event_id: i32,
        member_id: i32,
    ) -> Result<RegistrationRemoval, EventError> {
        let mut tx = self.pool.begin().await?;

        let payment_status: RegistrationPaymentStatus = sqlx::query_scalar(
            r#"
            SELECT payment_status FROM event_registration
            WHERE event_id = $1 AND member_id = $2
            FOR UPDATE
            "#,
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EventError::RegistrationNotFound)?;

        let start_time: DateTime<Utc> =
            sqlx::query_scalar("SELECT start_time FROM event WHERE event_id = $1")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(EventError::NotFound)?;

        let outcome = if Utc::now() < start_time
            && payment_status == RegistrationPaymentStatus::Refunded
        {
            sqlx::query(
                "DELETE FROM event_registration WHERE event_id = $1 AND member_id = $2",
            )
            .bind(event_id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
            RegistrationRemoval::Deleted
        } else {
            sqlx::query(
                r#"
                UPDATE event_registration
                SET attendance_status = 'CANCELLED'
                WHERE event_id = $1 AND member_id = $2
                "#,
            )
            .bind(event_id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
            RegistrationRemoval::Cancelled
        };

        tx.commit().await?;

        Ok(outcome)
    }
}
