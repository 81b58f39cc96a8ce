use crate::adoptions::ApplicationStatus;

/// Service for managing adoption application status transitions
///
/// Only pending applications may be reviewed; every reviewed status is
/// terminal.
pub struct ApplicationStatusMachine;

impl ApplicationStatusMachine {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - Pending → Approved
    /// - Pending → Rejected
    /// - Pending → Withdrawn
    /// - Any status → Same status (idempotent)
    pub fn is_valid_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
        // Same status is always valid (idempotent)
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (ApplicationStatus::Pending, ApplicationStatus::Approved)
                | (ApplicationStatus::Pending, ApplicationStatus::Rejected)
                | (ApplicationStatus::Pending, ApplicationStatus::Withdrawn)
        )
    }

    /// Attempt to transition from one status to another
    ///
    /// # Returns
    /// `Ok(to)` if the transition is valid, `Err(message)` otherwise
    pub fn transition(
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<ApplicationStatus, String> {
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
    fn test_pending_can_be_approved() {
        assert!(ApplicationStatusMachine::is_valid_transition(
            ApplicationStatus::Pending,
            ApplicationStatus::Approved
        ));
    }

    #[test]
    fn test_pending_can_be_rejected() {
        assert!(ApplicationStatusMachine::is_valid_transition(
            ApplicationStatus::Pending,
            ApplicationStatus::Rejected
        ));
    }

    #[test]
    fn test_pending_can_be_withdrawn() {
        assert!(ApplicationStatusMachine::is_valid_transition(
            ApplicationStatus::Pending,
            ApplicationStatus::Withdrawn
        ));
    }

    #[test]
    fn test_approved_cannot_be_rejected() {
        assert!(!ApplicationStatusMachine::is_valid_transition(
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected
        ));
    }

    #[test]
    fn test_rejected_cannot_be_approved() {
        assert!(!ApplicationStatusMachine::is_valid_transition(
            ApplicationStatus::Rejected,
            ApplicationStatus::Approved
        ));
    }

    #[test]
    fn test_withdrawn_cannot_return_to_pending() {
        assert!(!ApplicationStatusMachine::is_valid_transition(
            ApplicationStatus::Withdrawn,
            ApplicationStatus::Pending
        ));
    }

    #[test]
    fn test_conflicting_decisions_cannot_both_apply() {
        // Two reviewers deciding the same application: whichever decision
        // lands first wins, the other is refused against the new status
        let decided = ApplicationStatusMachine::transition(
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
        )
        .unwrap();
        assert!(
            ApplicationStatusMachine::transition(decided, ApplicationStatus::Rejected).is_err()
        );
    }

    #[test]
    fn test_transition_invalid_message() {
        let result = ApplicationStatusMachine::transition(
            ApplicationStatus::Approved,
            ApplicationStatus::Pending,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid status transition"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn application_status_strategy() -> impl Strategy<Value = ApplicationStatus> {
        prop_oneof![
            Just(ApplicationStatus::Pending),
            Just(ApplicationStatus::Approved),
            Just(ApplicationStatus::Rejected),
            Just(ApplicationStatus::Withdrawn),
        ]
    }

    /// Same-status transitions are always valid (idempotent)
    #[test]
    fn prop_same_status_is_valid() {
        proptest!(|(status in application_status_strategy())| {
            prop_assert!(ApplicationStatusMachine::is_valid_transition(status, status));
        });
    }

    /// Every reviewed status is terminal
    #[test]
    fn prop_reviewed_statuses_are_terminal() {
        proptest!(|(
            from in application_status_strategy(),
            to in application_status_strategy()
        )| {
            if from != ApplicationStatus::Pending && from != to {
                prop_assert!(!ApplicationStatusMachine::is_valid_transition(from, to));
            }
        });
    }

    /// transition() and is_valid_transition() agree
    #[test]
    fn prop_transition_consistency() {
        proptest!(|(
            from in application_status_strategy(),
            to in application_status_strategy()
        )| {
            let is_valid = ApplicationStatusMachine::is_valid_transition(from, to);
            let result = ApplicationStatusMachine::transition(from, to);

            if is_valid {
                prop_assert_eq!(result, Ok(to));
            } else {
                prop_assert!(result.is_err());
            }
        });
    }
}
