use rust_decimal::Decimal;

/// Service for calculating order line subtotals and discounted totals
pub struct PriceCalculator;

impl PriceCalculator {
    /// Calculate the subtotal for an order line
    ///
    /// # Arguments
    /// * `quantity` - Number of units ordered
    /// * `unit_price` - Menu price captured when the line was added
    ///
    /// # Returns
    /// Subtotal as Decimal (quantity * unit_price)
    pub fn calculate_subtotal(quantity: i32, unit_price: Decimal) -> Decimal {
        Decimal::from(quantity) * unit_price
    }

    /// Calculate the undiscounted total for an order
    pub fn calculate_base_total(subtotals: &[Decimal]) -> Decimal {
        subtotals.iter().sum()
    }

    /// Apply a membership tier discount to a base total
    ///
    /// The discount is a single multiplicative percentage applied once to
    /// the whole order, never per line. A rate of 10 means
    /// `total * 0.90`. No tier means no discount.
    pub fn apply_discount(base_total: Decimal, discount_rate: Option<Decimal>) -> Decimal {
        match discount_rate {
            Some(rate) => base_total * (Decimal::ONE - rate / Decimal::from(100)),
            None => base_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_subtotal_basic() {
        let subtotal = PriceCalculator::calculate_subtotal(2, dec!(4.50));
        assert_eq!(subtotal, dec!(9.00));
    }

    #[test]
    fn test_calculate_subtotal_single_unit() {
        let subtotal = PriceCalculator::calculate_subtotal(1, dec!(3.75));
        assert_eq!(subtotal, dec!(3.75));
    }

    #[test]
    fn test_calculate_base_total() {
        let subtotals = vec![dec!(10.00), dec!(5.50), dec!(3.25)];
        assert_eq!(PriceCalculator::calculate_base_total(&subtotals), dec!(18.75));
    }

    #[test]
    fn test_calculate_base_total_empty() {
        let subtotals: Vec<Decimal> = vec![];
        assert_eq!(PriceCalculator::calculate_base_total(&subtotals), dec!(0));
    }

    #[test]
    fn test_apply_discount_ten_percent() {
        // 30.00 + 5.00 at 10% off comes to 31.50
        let base = PriceCalculator::calculate_base_total(&[dec!(30.00), dec!(5.00)]);
        let total = PriceCalculator::apply_discount(base, Some(dec!(10)));
        assert_eq!(total, dec!(31.500));
    }

    #[test]
    fn test_apply_discount_none() {
        assert_eq!(
            PriceCalculator::apply_discount(dec!(35.00), None),
            dec!(35.00)
        );
    }

    #[test]
    fn test_apply_discount_zero_rate() {
        assert_eq!(
            PriceCalculator::apply_discount(dec!(35.00), Some(dec!(0))),
            dec!(35.00)
        );
    }

    #[test]
    fn test_apply_discount_full_rate() {
        assert_eq!(
            PriceCalculator::apply_discount(dec!(20.00), Some(dec!(100))),
            dec!(0.00)
        );
    }

    #[test]
    fn test_discount_applies_once_not_per_line() {
        // Discounting the summed total must equal discounting each line,
        // but the calculation goes through the sum exactly once
        let lines = [dec!(12.00), dec!(8.00)];
        let base = PriceCalculator::calculate_base_total(&lines);
        let total = PriceCalculator::apply_discount(base, Some(dec!(25)));
        assert_eq!(total, dec!(15.0000));
    }

    #[test]
    fn test_refinalizing_after_new_line_reprices_whole_bill() {
        let rate = Some(dec!(10));

        let first_base = PriceCalculator::calculate_base_total(&[dec!(30.00), dec!(5.00)]);
        let first_total = PriceCalculator::apply_discount(first_base, rate);
        assert_eq!(first_total, dec!(31.50));

        // Another line lands, the bill is finalized again from scratch
        let second_base =
            PriceCalculator::calculate_base_total(&[dec!(30.00), dec!(5.00), dec!(10.00)]);
        let second_total = PriceCalculator::apply_discount(second_base, rate);
        assert_eq!(second_total, dec!(40.50));
    }

    #[test]
    fn test_decimal_precision() {
        let subtotal = PriceCalculator::calculate_subtotal(3, dec!(4.33));
        assert_eq!(subtotal, dec!(12.99));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    /// Subtotal equals quantity times unit price for all valid inputs
    #[test]
    fn prop_subtotal_calculation_invariant() {
        proptest!(|(
            quantity in 1i32..=1000,
            price_cents in 1u32..=10000u32
        )| {
            let price = Decimal::from(price_cents) / Decimal::from(100);
            let subtotal = PriceCalculator::calculate_subtotal(quantity, price);
            prop_assert_eq!(subtotal, Decimal::from(quantity) * price);
        });
    }

    /// Base total equals the sum of subtotals
    #[test]
    fn prop_base_total_is_sum() {
        proptest!(|(
            subtotals_cents in prop::collection::vec(1u32..=100000u32, 1..=20)
        )| {
            let subtotals: Vec<Decimal> = subtotals_cents
                .iter()
                .map(|&cents| Decimal::from(cents) / Decimal::from(100))
                .collect();

            let total = PriceCalculator::calculate_base_total(&subtotals);
            let expected: Decimal = subtotals.iter().sum();
            prop_assert_eq!(total, expected);
        });
    }

    /// A valid discount never produces a negative or inflated total
    #[test]
    fn prop_discounted_total_bounded() {
        proptest!(|(
            base_cents in 0u32..=1000000u32,
            rate_whole in 0u32..=100u32
        )| {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let rate = Decimal::from(rate_whole);
            let total = PriceCalculator::apply_discount(base, Some(rate));

            prop_assert!(total >= Decimal::ZERO);
            prop_assert!(total <= base);
        });
    }

    /// Applying the discount to the same base twice gives the same result
    #[test]
    fn prop_discount_is_deterministic() {
        proptest!(|(
            base_cents in 0u32..=1000000u32,
            rate_whole in 0u32..=100u32
        )| {
            let base = Decimal::from(base_cents) / Decimal::from(100);
            let rate = Some(Decimal::from(rate_whole));
            prop_assert_eq!(
                PriceCalculator::apply_discount(base, rate),
                PriceCalculator::apply_discount(base, rate)
            );
        });
    }

    /// Line order does not change the base total
    #[test]
    fn prop_base_total_is_commutative() {
        proptest!(|(
            subtotals_cents in prop::collection::vec(1u32..=10000u32, 2..=10)
        )| {
            let subtotals: Vec<Decimal> = subtotals_cents
                .iter()
                .map(|&cents| Decimal::from(cents) / Decimal::from(100))
                .collect();

            let total1 = PriceCalculator::calculate_base_total(&subtotals);

            let mut reversed = subtotals.clone();
            reversed.reverse();
            let total2 = PriceCalculator::calculate_base_total(&reversed);

            prop_assert_eq!(total1, total2);
        });
    }
}
