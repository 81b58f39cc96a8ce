use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;

use crate::reservations::error::ReservationError;
use crate::reservations::{Reservation, ReservationStatus, StatusMachine};

/// Repository for reservation operations
#[derive(Clone)]
pub struct ReservationsRepository {
    pool: PgPool,
}

impl ReservationsRepository {
    /// Create a new ReservationsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Book a reservation with a transactional capacity check
    ///
    /// The room row is locked (`FOR UPDATE`) before counting overlapping
    /// BOOKED/IN_PROGRESS reservations, so two concurrent bookings for the
    /// same room serialize and cannot jointly exceed capacity. The overlap
    /// test is strict: `existing.start < new.end AND existing.end > new.start`.
    pub async fn book(
        &self,
        member_id: i32,
        room_id: i32,
        reservation_date: NaiveDate,
        start_time: DateTime<Utc>,
        duration_minutes: i32,
        tier_override: Option<i32>,
    ) -> Result<Reservation, ReservationError> {
        let mut tx = self.pool.begin().await?;

        // Resolve the tier snapshot: explicit override, else the member's
        // current tier. Also serves as the member existence check.
        let member_tier: Option<i32> =
            sqlx::query_scalar("SELECT tier_id FROM member WHERE member_id = $1")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(ReservationError::MemberNotFound(member_id))?;

        let tier_id = tier_override.or(member_tier);

        // Lock the room row so concurrent bookings for this room serialize
        // on the capacity check.
        let max_capacity: i32 =
            sqlx::query_scalar("SELECT max_capacity FROM room WHERE room_id = $1 FOR UPDATE")
                .bind(room_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(ReservationError::RoomNotFound(room_id))?;

        let end_time = start_time + Duration::minutes(duration_minutes as i64);

        let overlapping: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reservation
            WHERE room_id = $1
              AND reservation_date = $2
              AND status IN ('BOOKED', 'IN_PROGRESS')
              AND start_time < $3
              AND start_time + make_interval(mins => duration_minutes) > $4
            "#,
        )
        .bind(room_id)
        .bind(reservation_date)
        .bind(end_time)
        .bind(start_time)
        .fetch_one(&mut *tx)
        .await?;

        if overlapping >= max_capacity as i64 {
            // Dropping the transaction releases the room lock.
            return Err(ReservationError::CapacityExceeded);
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservation
                (member_id, room_id, reservation_date, start_time, duration_minutes, status, tier_id)
            VALUES ($1, $2, $3, $4, $5, 'BOOKED', $6)
            RETURNING reservation_id, member_id, room_id, reservation_date, start_time,
                      duration_minutes, status, tier_id, check_out_time
            "#,
        )
        .bind(member_id)
        .bind(room_id)
        .bind(reservation_date)
        .bind(start_time)
        .bind(duration_minutes)
        .bind(tier_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(reservation)
    }

    /// Cancel a reservation by hard-deleting the row
    ///
    /// Only allowed strictly before the start time and while no orders
    /// reference the reservation; both checks run inside one transaction
    /// with the reservation row locked.
    pub async fn cancel(&self, reservation_id: i32) -> Result<(), ReservationError> {
        let mut tx = self.pool.begin().await?;

        let start_time: DateTime<Utc> = sqlx::query_scalar(
            "SELECT start_time FROM reservation WHERE reservation_id = $1 FOR UPDATE",
        )
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ReservationError::NotFound)?;

        if Utc::now() >= start_time {
            return Err(ReservationError::AlreadyStarted);
        }

        let order_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customer_order WHERE reservation_id = $1")
                .bind(reservation_id)
                .fetch_one(&mut *tx)
                .await?;

        if order_count > 0 {
            return Err(ReservationError::HasOrders);
        }

        sqlx::query("DELETE FROM reservation WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Find a reservation by ID
    pub async fn find_by_id(
        &self,
        reservation_id: i32,
    ) -> Result<Option<Reservation>, ReservationError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT reservation_id, member_id, room_id, reservation_date, start_time,
                   duration_minutes, status, tier_id, check_out_time
            FROM reservation
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// List all reservations ordered by ID
    pub async fn list(&self) -> Result<Vec<Reservation>, ReservationError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT reservation_id, member_id, room_id, reservation_date, start_time,
                   duration_minutes, status, tier_id, check_out_time
            FROM reservation
            ORDER BY reservation_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Update a reservation's status, optionally stamping the check-out time
    ///
    /// The row is locked before the transition check so the check and the
    /// write see the same status; a concurrent session cannot slip a
    /// conflicting update between them.
    pub async fn update_status(
        &self,
        reservation_id: i32,
        new_status: ReservationStatus,
        check_out_now: bool,
    ) -> Result<Reservation, ReservationError> {
        let mut tx = self.pool.begin().await?;

        let current: ReservationStatus = sqlx::query_scalar(
            "SELECT status FROM reservation WHERE reservation_id = $1 FOR UPDATE",
        )
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ReservationError::NotFound)?;

        StatusMachine::transition(current, new_status)
            .map_err(ReservationError::InvalidTransition)?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservation
            SET status = $1,
                check_out_time = CASE WHEN $2 THEN NOW() ELSE check_out_time END
            WHERE reservation_id = $3
            RETURNING reservation_id, member_id, room_id, reservation_date, start_time,
                      duration_minutes, status, tier_id, check_out_time
            "#,
        )
        .bind(new_status)
        .bind(check_out_now)
        .bind(reservation_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(reservation)
    }
}
