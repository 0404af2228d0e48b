//! Margins

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;

use crate::rounding::{round2, round_whole};

/// A sell-side margin over the purchase price.
///
/// Always computed from netto prices: the purchase and sale legs can carry
/// different VAT rates, so brutto-based margins would be skewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Margin {
    /// Margin as an integer percentage of the purchase price.
    pub percent: i64,

    /// Margin amount in currency, two decimal places.
    pub amount: Decimal,
}

impl Margin {
    /// The zero margin reported when no purchase price is known.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Calculates the margin of a netto sell price over a netto purchase price.
///
/// A missing, zero or negative purchase price yields [`Margin::zero`] rather
/// than an error; purchase cost is frequently unknown for parts of the
/// catalog and must not block the price table.
pub fn margin(sell_netto: Decimal, buy_netto: Option<Decimal>) -> Margin {
    let Some(buy) = buy_netto.filter(|buy| *buy > Decimal::ZERO) else {
        return Margin::zero();
    };

    let amount = round2(sell_netto - buy);
    // A ratio beyond i64 range saturates rather than collapsing to zero.
    let ratio = round_whole(amount / buy * Decimal::ONE_HUNDRED);
    let percent = ratio.to_i64().unwrap_or_else(|| {
        if ratio.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    });

    Margin { percent, amount }
}
