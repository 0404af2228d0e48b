//! VAT rates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rounding::round2;

/// The standard Polish VAT rate, used when a product carries none.
pub const DEFAULT_VAT_PERCENT: u8 = 23;

/// Errors that can occur while constructing a VAT rate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VatRateError {
    /// The percentage lies outside `[0, 100]`.
    #[error("VAT rate must be between 0 and 100 percent, got {0}")]
    OutOfRange(u8),
}

/// A VAT rate, stored as an integer percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct VatRate(u8);

impl VatRate {
    /// Creates a VAT rate from an integer percentage.
    ///
    /// # Errors
    ///
    /// Returns [`VatRateError::OutOfRange`] when `percent > 100`.
    pub fn new(percent: u8) -> Result<Self, VatRateError> {
        if percent > 100 {
            Err(VatRateError::OutOfRange(percent))
        } else {
            Ok(Self(percent))
        }
    }

    /// Returns the rate as an integer percentage.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Multiplier taking a netto price to its brutto price, e.g. `1.23` for 23%.
    pub fn factor(self) -> Decimal {
        Decimal::ONE + Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }

    /// Derives the brutto price from a netto price, rounded to two decimals.
    pub fn gross_from_net(self, netto: Decimal) -> Decimal {
        round2(netto * self.factor())
    }

    /// Derives the netto price from a brutto price, rounded to two decimals.
    pub fn net_from_gross(self, brutto: Decimal) -> Decimal {
        round2(brutto / self.factor())
    }
}

impl Default for VatRate {
    fn default() -> Self {
        Self(DEFAULT_VAT_PERCENT)
    }
}

impl TryFrom<u8> for VatRate {
    type Error = VatRateError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<VatRate> for u8 {
    fn from(rate: VatRate) -> Self {
        rate.percent()
    }
}
