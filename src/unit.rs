//! Unit prices

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit of measure for a product's contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Weight in grams; unit prices are quoted per 100 g.
    Grams,

    /// Volume in milliliters; unit prices are quoted per 100 ml.
    Milliliters,

    /// Countable tablets; unit prices are quoted per tablet.
    Tablets,

    /// Countable capsules; unit prices are quoted per capsule.
    Capsules,

    /// Countable pieces; unit prices are quoted per piece.
    Pieces,

    /// No unit recorded; unit prices are not computable.
    #[default]
    Unset,
}

impl Unit {
    /// True for units whose price is quoted per 100 rather than per piece.
    pub fn per_hundred(self) -> bool {
        matches!(self, Unit::Grams | Unit::Milliliters)
    }

    /// The base the unit price is quoted against on a price label.
    pub fn quote_base(self) -> Option<&'static str> {
        match self {
            Unit::Grams => Some("100 g"),
            Unit::Milliliters => Some("100 ml"),
            Unit::Tablets => Some("1 tabl."),
            Unit::Capsules => Some("1 kaps."),
            Unit::Pieces => Some("1 szt."),
            Unit::Unset => None,
        }
    }
}

/// Normalizes a total price to a unit price: per 100 g/ml for weight and
/// volume units, per single piece for countable units.
///
/// Returns `0` when the unit is [`Unit::Unset`] or the amount is not
/// positive. Callers treat zero as "nothing to display", not as a failure.
///
/// The result is left unrounded so that [`price_for_amount`] inverts it
/// exactly; display sites round to two decimals themselves.
pub fn per_unit(total_price: Decimal, amount: Decimal, unit: Unit) -> Decimal {
    if unit == Unit::Unset || amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let per_one = total_price / amount;

    if unit.per_hundred() {
        per_one * Decimal::ONE_HUNDRED
    } else {
        per_one
    }
}

/// Inverse of [`per_unit`]: the total price for a target amount at a given
/// unit price.
///
/// Returns `0` for [`Unit::Unset`] or a non-positive target amount.
pub fn price_for_amount(unit_price: Decimal, target_amount: Decimal, unit: Unit) -> Decimal {
    if unit == Unit::Unset || target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    if unit.per_hundred() {
        unit_price / Decimal::ONE_HUNDRED * target_amount
    } else {
        unit_price * target_amount
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn grams_are_quoted_per_hundred() {
        // 100.00 for 500 g -> 20.00 per 100 g.
        assert_eq!(per_unit(dec!(100.00), dec!(500), Unit::Grams), dec!(20.00));
    }

    #[test]
    fn tablets_are_quoted_per_piece() {
        assert_eq!(per_unit(dec!(12.00), dec!(30), Unit::Tablets), dec!(0.40));
    }

    #[test]
    fn unset_unit_and_bad_amounts_give_zero() {
        assert_eq!(per_unit(dec!(10.00), dec!(5), Unit::Unset), Decimal::ZERO);
        assert_eq!(per_unit(dec!(10.00), Decimal::ZERO, Unit::Grams), Decimal::ZERO);
        assert_eq!(per_unit(dec!(10.00), dec!(-5), Unit::Pieces), Decimal::ZERO);

        assert_eq!(
            price_for_amount(dec!(10.00), dec!(5), Unit::Unset),
            Decimal::ZERO
        );
        assert_eq!(
            price_for_amount(dec!(10.00), Decimal::ZERO, Unit::Milliliters),
            Decimal::ZERO
        );
    }

    #[test]
    fn price_for_amount_inverts_per_unit() {
        assert_eq!(
            price_for_amount(dec!(20.00), dec!(500), Unit::Grams),
            dec!(100.00)
        );
        assert_eq!(
            price_for_amount(dec!(0.40), dec!(30), Unit::Capsules),
            dec!(12.00)
        );
    }

    #[test]
    fn round_trip_within_a_grosz() {
        let cases = [
            (dec!(7.49), dec!(250), Unit::Grams),
            (dec!(12.95), dec!(330), Unit::Milliliters),
            (dec!(19.99), dec!(60), Unit::Tablets),
            (dec!(5.00), dec!(3), Unit::Pieces),
            (dec!(0.99), dec!(10), Unit::Capsules),
        ];

        for (price, amount, unit) in cases {
            let back = price_for_amount(per_unit(price, amount, unit), amount, unit);

            assert!(
                (back - price).abs() <= dec!(0.01),
                "{price} over {amount} {unit:?} came back as {back}"
            );
        }
    }

    #[test]
    fn quote_base_matches_normalisation() {
        assert_eq!(Unit::Grams.quote_base(), Some("100 g"));
        assert_eq!(Unit::Pieces.quote_base(), Some("1 szt."));
        assert_eq!(Unit::Unset.quote_base(), None);
    }
}
