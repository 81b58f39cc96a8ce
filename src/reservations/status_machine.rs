use crate::reservations::ReservationStatus;

/// Service for managing reservation status transitions
///
/// Updates must walk the lifecycle in order; a BOOKED visit cannot jump
/// straight to COMPLETED without checking in.
pub struct StatusMachine;

impl StatusMachine {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - Booked → InProgress (check-in)
    /// - InProgress → Completed (check-out)
    /// - Any status → Same status (idempotent)
    ///
    /// Cancelled is never a valid target here: cancelling in advance deletes
    /// the reservation row (see `ReservationService::cancel`).
    pub fn is_valid_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
        // Same status is always valid (idempotent)
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (ReservationStatus::Booked, ReservationStatus::InProgress)
                | (ReservationStatus::InProgress, ReservationStatus::Completed)
        )
    }

    /// Attempt to transition from one status to another
    ///
    /// # Returns
    /// `Ok(to)` if the transition is valid, `Err(message)` otherwise
    pub fn transition(
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> Result<ReservationStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid status transition from {} to {}", from, to))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booked_to_in_progress() {
        assert!(StatusMachine::is_valid_transition(
            ReservationStatus::Booked,
            ReservationStatus::InProgress
        ));
    }

    #[test]
    fn test_in_progress_to_completed() {
        assert!(StatusMachine::is_valid_transition(
            ReservationStatus::InProgress,
            ReservationStatus::Completed
        ));
    }

    #[test]
    fn test_booked_cannot_skip_to_completed() {
        assert!(!StatusMachine::is_valid_transition(
            ReservationStatus::Booked,
            ReservationStatus::Completed
        ));
    }

    #[test]
    fn test_cancelled_is_not_a_valid_target() {
        assert!(!StatusMachine::is_valid_transition(
            ReservationStatus::Booked,
            ReservationStatus::Cancelled
        ));
        assert!(!StatusMachine::is_valid_transition(
            ReservationStatus::InProgress,
            ReservationStatus::Cancelled
        ));
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(!StatusMachine::is_valid_transition(
            ReservationStatus::InProgress,
            ReservationStatus::Booked
        ));
        assert!(!StatusMachine::is_valid_transition(
            ReservationStatus::Completed,
            ReservationStatus::InProgress
        ));
        assert!(!StatusMachine::is_valid_transition(
            ReservationStatus::Completed,
            ReservationStatus::Booked
        ));
    }

    #[test]
    fn test_stale_update_cannot_reopen_completed() {
        let checked_out = StatusMachine::transition(
            ReservationStatus::InProgress,
            ReservationStatus::Completed,
        )
        .unwrap();
        assert!(StatusMachine::transition(checked_out, ReservationStatus::InProgress).is_err());
    }

    #[test]
    fn test_transition_valid() {
        let result =
            StatusMachine::transition(ReservationStatus::Booked, ReservationStatus::InProgress);
        assert_eq!(result, Ok(ReservationStatus::InProgress));
    }

    #[test]
    fn test_transition_invalid() {
        let result =
            StatusMachine::transition(ReservationStatus::Booked, ReservationStatus::Completed);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid status transition"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn reservation_status_strategy() -> impl Strategy<Value = ReservationStatus> {
        prop_oneof![
            Just(ReservationStatus::Booked),
            Just(ReservationStatus::InProgress),
            Just(ReservationStatus::Completed),
            Just(ReservationStatus::Cancelled),
        ]
    }

    /// Same-status transitions are always valid (idempotent)
    #[test]
    fn prop_same_status_is_valid() {
        proptest!(|(status in reservation_status_strategy())| {
            prop_assert!(StatusMachine::is_valid_transition(status, status));
        });
    }

    /// Completed is terminal: nothing moves out of it
    #[test]
    fn prop_completed_is_terminal() {
        proptest!(|(to in reservation_status_strategy())| {
            if to != ReservationStatus::Completed {
                prop_assert!(!StatusMachine::is_valid_transition(
                    ReservationStatus::Completed,
                    to
                ));
            }
        });
    }

    /// transition() and is_valid_transition() agree
    #[test]
    fn prop_transition_consistency() {
        proptest!(|(
            from in reservation_status_strategy(),
            to in reservation_status_strategy()
        )| {
            let is_valid = StatusMachine::is_valid_transition(from, to);
            let result = StatusMachine::transition(from, to);

            if is_valid {
                prop_assert_eq!(result, Ok(to));
            } else {
                prop_assert!(result.is_err());
            }
        });
    }
}
