//! Rounding

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for stored monetary values.
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary value to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to a whole number, half away from zero.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn round2_half_goes_away_from_zero() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round2(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn round_whole_half_goes_away_from_zero() {
        assert_eq!(round_whole(dec!(12.5)), dec!(13));
        assert_eq!(round_whole(dec!(-12.5)), dec!(-13));
        assert_eq!(round_whole(dec!(12.4)), dec!(12));
    }
}
