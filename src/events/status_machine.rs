use crate::events::{AttendanceStatus, RegistrationPaymentStatus};

/// Service for managing event registration status transitions
///
/// Attendance resolves exactly once from REGISTERED; payment walks the
/// UNPAID, PAID, REFUNDED chain in order.
pub struct RegistrationStatusMachine;

impl RegistrationStatusMachine {
    /// Check if an attendance transition is valid
    ///
    /// # Valid Transitions
    /// - Registered → Attended
    /// - Registered → NoShow
    /// - Registered → Cancelled
    /// - Any status → Same status (idempotent)
    pub fn is_valid_attendance_transition(from: AttendanceStatus, to: AttendanceStatus) -> bool {
        // Same status is always valid (idempotent)
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (AttendanceStatus::Registered, AttendanceStatus::Attended)
                | (AttendanceStatus::Registered, AttendanceStatus::NoShow)
                | (AttendanceStatus::Registered, AttendanceStatus::Cancelled)
        )
    }

    /// Check if a payment transition is valid
    ///
    /// # Valid Transitions
    /// - Unpaid → Paid
    /// - Paid → Refunded
    /// - Any status → Same status (idempotent)
    pub fn is_valid_payment_transition(
        from: RegistrationPaymentStatus,
        to: RegistrationPaymentStatus,
    ) -> bool {
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (
                RegistrationPaymentStatus::Unpaid,
                RegistrationPaymentStatus::Paid
            ) | (
                RegistrationPaymentStatus::Paid,
                RegistrationPaymentStatus::Refunded
            )
        )
    }

    /// Attempt an attendance transition
    pub fn attendance_transition(
        from: AttendanceStatus,
        to: AttendanceStatus,
    ) -> Result<AttendanceStatus, String> {
        if Self::is_valid_attendance_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid status transition from {} to {}", from, to))
        }
    }

    /// Attempt a payment transition
    pub fn payment_transition(
        from: RegistrationPaymentStatus,
        to: RegistrationPaymentStatus,
    ) -> Result<RegistrationPaymentStatus, String> {
        if Self::is_valid_payment_transition(from, to) {
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
    fn test_registered_resolves_to_attended() {
        assert!(RegistrationStatusMachine::is_valid_attendance_transition(
            AttendanceStatus::Registered,
            AttendanceStatus::Attended
        ));
    }

    #[test]
    fn test_registered_resolves_to_no_show() {
        assert!(RegistrationStatusMachine::is_valid_attendance_transition(
            AttendanceStatus::Registered,
            AttendanceStatus::NoShow
        ));
    }

    #[test]
    fn test_attended_is_terminal() {
        assert!(!RegistrationStatusMachine::is_valid_attendance_transition(
            AttendanceStatus::Attended,
            AttendanceStatus::NoShow
        ));
        assert!(!RegistrationStatusMachine::is_valid_attendance_transition(
            AttendanceStatus::Attended,
            AttendanceStatus::Registered
        ));
    }

    #[test]
    fn test_cancelled_cannot_reattend() {
        assert!(!RegistrationStatusMachine::is_valid_attendance_transition(
            AttendanceStatus::Cancelled,
            AttendanceStatus::Attended
        ));
    }

    #[test]
    fn test_conflicting_resolutions_cannot_both_apply() {
        // Whichever resolution lands first wins; the other is refused
        // against the updated status
        let resolved = RegistrationStatusMachine::attendance_transition(
            AttendanceStatus::Registered,
            AttendanceStatus::Attended,
        )
        .unwrap();
        assert!(RegistrationStatusMachine::attendance_transition(
            resolved,
            AttendanceStatus::NoShow
        )
        .is_err());
    }

    #[test]
    fn test_unpaid_to_paid() {
        assert!(RegistrationStatusMachine::is_valid_payment_transition(
            RegistrationPaymentStatus::Unpaid,
            RegistrationPaymentStatus::Paid
        ));
    }

    #[test]
    fn test_paid_to_refunded() {
        assert!(RegistrationStatusMachine::is_valid_payment_transition(
            RegistrationPaymentStatus::Paid,
            RegistrationPaymentStatus::Refunded
        ));
    }

    #[test]
    fn test_unpaid_cannot_skip_to_refunded() {
        assert!(!RegistrationStatusMachine::is_valid_payment_transition(
            RegistrationPaymentStatus::Unpaid,
            RegistrationPaymentStatus::Refunded
        ));
    }

    #[test]
    fn test_refunded_is_terminal() {
        assert!(!RegistrationStatusMachine::is_valid_payment_transition(
            RegistrationPaymentStatus::Refunded,
            RegistrationPaymentStatus::Paid
        ));
        assert!(!RegistrationStatusMachine::is_valid_payment_transition(
            RegistrationPaymentStatus::Refunded,
            RegistrationPaymentStatus::Unpaid
        ));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn attendance_strategy() -> impl Strategy<Value = AttendanceStatus> {
        prop_oneof![
            Just(AttendanceStatus::Registered),
            Just(AttendanceStatus::Attended),
            Just(AttendanceStatus::NoShow),
            Just(AttendanceStatus::Cancelled),
        ]
    }

    fn payment_strategy() -> impl Strategy<Value = RegistrationPaymentStatus> {
        prop_oneof![
            Just(RegistrationPaymentStatus::Unpaid),
            Just(RegistrationPaymentStatus::Paid),
            Just(RegistrationPaymentStatus::Refunded),
        ]
    }

    /// Same-status transitions are always valid (idempotent)
    #[test]
    fn prop_same_status_is_valid() {
        proptest!(|(a in attendance_strategy(), p in payment_strategy())| {
            prop_assert!(RegistrationStatusMachine::is_valid_attendance_transition(a, a));
            prop_assert!(RegistrationStatusMachine::is_valid_payment_transition(p, p));
        });
    }

    /// Every resolved attendance status is terminal
    #[test]
    fn prop_resolved_attendance_is_terminal() {
        proptest!(|(from in attendance_strategy(), to in attendance_strategy())| {
            if from != AttendanceStatus::Registered && from != to {
                prop_assert!(!RegistrationStatusMachine::is_valid_attendance_transition(from, to));
            }
        });
    }

    /// Payment never moves backwards along the chain
    #[test]
    fn prop_payment_never_reverses() {
        fn rank(s: RegistrationPaymentStatus) -> u8 {
            match s {
                RegistrationPaymentStatus::Unpaid => 0,
                RegistrationPaymentStatus::Paid => 1,
                RegistrationPaymentStatus::Refunded => 2,
            }
        }

        proptest!(|(from in payment_strategy(), to in payment_strategy())| {
            if rank(to) < rank(from) {
                prop_assert!(!RegistrationStatusMachine::is_valid_payment_transition(from, to));
            }
        });
    }
}
