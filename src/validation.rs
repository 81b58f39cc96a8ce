// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a money amount is strictly positive
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        Err(ValidationError::new("price_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a fee is non-negative (adoption fees may be waived)
pub fn validate_non_negative_fee(fee: &Decimal) -> Result<(), ValidationError> {
    if *fee < Decimal::ZERO {
        Err(ValidationError::new("fee_must_be_non_negative"))
    } else {
        Ok(())
    }
}

/// Validates that a tier discount rate is a percentage in 0..=100
pub fn validate_discount_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate < Decimal::ZERO || *rate > Decimal::from(100) {
        Err(ValidationError::new("discount_rate_out_of_range"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_price_accepts_positive() {
        assert!(validate_positive_price(&dec!(4.50)).is_ok());
    }

    #[test]
    fn test_positive_price_rejects_zero_and_negative() {
        assert!(validate_positive_price(&dec!(0)).is_err());
        assert!(validate_positive_price(&dec!(-1.25)).is_err());
    }

    #[test]
    fn test_non_negative_fee_accepts_zero() {
        assert!(validate_non_negative_fee(&dec!(0)).is_ok());
        assert!(validate_non_negative_fee(&dec!(50.00)).is_ok());
        assert!(validate_non_negative_fee(&dec!(-0.01)).is_err());
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert!(validate_discount_rate(&dec!(0)).is_ok());
        assert!(validate_discount_rate(&dec!(100)).is_ok());
        assert!(validate_discount_rate(&dec!(100.01)).is_err());
        assert!(validate_discount_rate(&dec!(-5)).is_err());
    }
}
