use chrono::{DateTime, Utc};

use crate::reservations::{
    BookReservationRequest, Reservation, ReservationError, ReservationsRepository,
};

/// Strict interval overlap: `[start_a, end_a)` intersects `[start_b, end_b)`
///
/// Touching intervals (one ends exactly when the other starts) do not overlap.
/// The repository expresses the same predicate in SQL; this mirror exists so
/// the rule itself is unit-testable.
pub fn intervals_overlap(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && end_a > start_b
}

/// Service for reservation business logic
#[derive(Clone)]
pub struct ReservationService {
    repo: ReservationsRepository,
}

impl ReservationService {
    /// Create a new ReservationService
    pub fn new(repo: ReservationsRepository) -> Self {
        Self { repo }
    }

    /// Book a reservation
    ///
    /// # Validation
    /// - Member and room must exist
    /// - The room must have free capacity over the requested interval,
    ///   counting only BOOKED/IN_PROGRESS reservations on the same date
    /// - The tier snapshot is the override if given, else the member's
    ///   current tier, else none
    pub async fn book(
        &self,
        request: BookReservationRequest,
    ) -> Result<Reservation, ReservationError> {
        if request.duration_minutes <= 0 {
            return Err(ReservationError::ValidationError(format!(
                "Duration must be positive, got {}",
                request.duration_minutes
            )));
        }

        let reservation = self
            .repo
            .book(
                request.member_id,
                request.room_id,
                request.reservation_date,
                request.start_time,
                request.duration_minutes,
                request.tier_id,
            )
            .await?;

        tracing::info!(
            "Booked reservation {} for member {} in room {}",
            reservation.reservation_id,
            reservation.member_id,
            reservation.room_id
        );

        Ok(reservation)
    }

    /// Cancel a reservation in advance
    ///
    /// Hard-deletes the row; rejected once the start time has passed or when
    /// orders reference the reservation.
    pub async fn cancel(&self, reservation_id: i32) -> Result<(), ReservationError> {
        self.repo.cancel(reservation_id).await?;
        tracing::info!("Cancelled and deleted reservation {}", reservation_id);
        Ok(())
    }

    /// Update a reservation's status
    ///
    /// The transition is validated against the status machine inside the
    /// repository transaction, with the row locked; check-out stamping is
    /// applied together with the status change.
    pub async fn update_status(
        &self,
        reservation_id: i32,
        new_status: crate::reservations::ReservationStatus,
        check_out_now: bool,
    ) -> Result<Reservation, ReservationError> {
        self.repo
            .update_status(reservation_id, new_status, check_out_now)
            .await
    }

    /// Get a reservation by ID
    pub async fn get_by_id(&self, reservation_id: i32) -> Result<Reservation, ReservationError> {
        self.repo
            .find_by_id(reservation_id)
            .await?
            .ok_or(ReservationError::NotFound)
    }

    /// List all reservations
    pub async fn list(&self) -> Result<Vec<Reservation>, ReservationError> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 8, hour, min, 0).unwrap()
    }

    #[test]
    fn test_overlapping_intervals() {
        // 10:00-11:00 vs 10:30-11:30
        assert!(intervals_overlap(t(10, 0), t(11, 0), t(10, 30), t(11, 30)));
    }

    #[test]
    fn test_contained_interval_overlaps() {
        // 10:00-12:00 contains 10:30-11:00
        assert!(intervals_overlap(t(10, 0), t(12, 0), t(10, 30), t(11, 0)));
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        // 10:00-11:00 vs 11:00-12:00: back-to-back bookings are fine
        assert!(!intervals_overlap(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(!intervals_overlap(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        assert!(!intervals_overlap(t(9, 0), t(10, 0), t(14, 0), t(15, 0)));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn minute(m: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 8, 0, 0, 0).unwrap() + chrono::Duration::minutes(m)
    }

    /// Overlap is symmetric
    #[test]
    fn prop_overlap_is_symmetric() {
        proptest!(|(
            a in 0i64..1000,
            da in 1i64..240,
            b in 0i64..1000,
            db in 1i64..240
        )| {
            let lhs = intervals_overlap(minute(a), minute(a + da), minute(b), minute(b + db));
            let rhs = intervals_overlap(minute(b), minute(b + db), minute(a), minute(a + da));
            prop_assert_eq!(lhs, rhs);
        });
    }

    /// An interval always overlaps itself
    #[test]
    fn prop_interval_overlaps_itself() {
        proptest!(|(a in 0i64..1000, da in 1i64..240)| {
            prop_assert!(intervals_overlap(minute(a), minute(a + da), minute(a), minute(a + da)));
        });
    }

    /// Intervals separated by any positive gap never overlap
    #[test]
    fn prop_gap_means_no_overlap() {
        proptest!(|(a in 0i64..1000, da in 1i64..240, gap in 0i64..240, db in 1i64..240)| {
            let b = a + da + gap;
            prop_assert!(!intervals_overlap(minute(a), minute(a + da), minute(b), minute(b + db)));
        });
    }
}
