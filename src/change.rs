//! Price changes

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{prices::PricePair, rounding::round2, vat::VatRate};

/// Errors from parsing or applying a price change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceChangeError {
    /// Margin-mode change requested for a product with no purchase price on
    /// record. In a bulk operation the item is skipped and counted, not fatal.
    #[error("no purchase price on record; cannot target a margin")]
    MissingPurchasePrice,

    /// The computed netto price came out non-positive. Skipped and counted
    /// like [`PriceChangeError::MissingPurchasePrice`].
    #[error("computed netto price {0} is not positive")]
    InvalidResult(Decimal),

    /// The submitted change could not be parsed or is out of range. Rejects
    /// the whole operation before any item is touched.
    #[error("invalid price change: {0}")]
    InvalidInput(String),
}

/// A single price mutation, as submitted by the pricing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum PriceChange {
    /// Add a fixed amount to the current netto price (negative to lower it).
    Amount(Decimal),

    /// Move the current netto price by this many percent points.
    Percent(Decimal),

    /// Reprice to a target margin, in percent points over the purchase netto
    /// price. Requires a known purchase price.
    #[serde(rename = "margin")]
    TargetMargin(Decimal),
}

impl PriceChange {
    /// Parses the mode/value strings submitted by the price-change form.
    ///
    /// # Errors
    ///
    /// Returns [`PriceChangeError::InvalidInput`] for an unknown mode, a
    /// non-numeric value, or a value rejected by [`PriceChange::validate`].
    pub fn parse(mode: &str, value: &str) -> Result<Self, PriceChangeError> {
        let value = Decimal::from_str(value.trim()).map_err(|err| {
            PriceChangeError::InvalidInput(format!("not a number: {value:?} ({err})"))
        })?;

        let change = match mode {
            "amount" => PriceChange::Amount(value),
            "percent" => PriceChange::Percent(value),
            "margin" => PriceChange::TargetMargin(value),
            other => {
                return Err(PriceChangeError::InvalidInput(format!(
                    "unknown change mode: {other:?}"
                )));
            }
        };

        change.validate()?;

        Ok(change)
    }

    /// Validates the change value once, before any batch item is touched.
    ///
    /// # Errors
    ///
    /// Returns [`PriceChangeError::InvalidInput`] for a percent change of
    /// −100% or below, which cannot yield a positive price for any item.
    pub fn validate(&self) -> Result<(), PriceChangeError> {
        match self {
            PriceChange::Percent(points) if *points <= dec!(-100) => {
                Err(PriceChangeError::InvalidInput(format!(
                    "percent change of {points}% would wipe out every price"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Applies the change to one product's current netto price.
    ///
    /// The netto result is computed first; brutto is derived from the VAT
    /// rate. With `psychological` set, the unrounded netto is handed to
    /// [`PricePair::psychological_from_netto`], which floors the raw brutto
    /// onto a `.99` ending and back-derives netto from it.
    ///
    /// # Errors
    ///
    /// - [`PriceChangeError::MissingPurchasePrice`] for margin mode without a
    ///   positive `buy_netto`.
    /// - [`PriceChangeError::InvalidResult`] when the computed netto is not
    ///   positive.
    pub fn apply(
        &self,
        current_netto: Decimal,
        vat: VatRate,
        buy_netto: Option<Decimal>,
        psychological: bool,
    ) -> Result<PricePair, PriceChangeError> {
        let new_netto = match self {
            PriceChange::Amount(amount) => current_netto + *amount,
            PriceChange::Percent(points) => {
                current_netto + Percentage::from(*points / Decimal::ONE_HUNDRED) * current_netto
            }
            PriceChange::TargetMargin(points) => {
                let buy = buy_netto
                    .filter(|buy| *buy > Decimal::ZERO)
                    .ok_or(PriceChangeError::MissingPurchasePrice)?;

                buy + Percentage::from(*points / Decimal::ONE_HUNDRED) * buy
            }
        };

        if new_netto <= Decimal::ZERO {
            return Err(PriceChangeError::InvalidResult(round2(new_netto)));
        }

        Ok(if psychological {
            PricePair::psychological_from_netto(new_netto, vat)
        } else {
            PricePair::from_netto(new_netto, vat)
        })
    }
}
