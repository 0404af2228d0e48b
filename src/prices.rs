//! Netto/brutto price pairs

use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};

use crate::{rounding::round2, vat::VatRate};

/// A stored price as a netto/brutto pair.
///
/// The two fields are kept mutually consistent under a product's VAT rate:
/// constructing from either side derives the other, so a form can let the
/// user edit netto or brutto interchangeably.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePair {
    /// Price excluding VAT.
    pub netto: Decimal,

    /// Price including VAT.
    pub brutto: Decimal,
}

impl PricePair {
    /// Builds a pair from a netto price; brutto is derived from the VAT rate.
    pub fn from_netto(netto: Decimal, vat: VatRate) -> Self {
        let netto = round2(netto);

        Self {
            netto,
            brutto: vat.gross_from_net(netto),
        }
    }

    /// Builds a pair from a brutto price; netto is derived from the VAT rate.
    pub fn from_brutto(brutto: Decimal, vat: VatRate) -> Self {
        let brutto = round2(brutto);

        Self {
            netto: vat.net_from_gross(brutto),
            brutto,
        }
    }

    /// Builds a `.99`-ending pair from a raw netto price.
    ///
    /// The raw brutto (`netto * factor`) is floored before any rounding:
    /// rounding first could carry a value just under a whole zloty across
    /// it and land the ending a full zloty high. Brutto becomes
    /// `floor(raw brutto) + 0.99` exactly; netto is the dependent quantity,
    /// derived from that brutto under the same VAT rate. The fields are set
    /// directly: re-deriving brutto from the rounded netto could drift off
    /// the `.99` ending.
    pub fn psychological_from_netto(netto: Decimal, vat: VatRate) -> Self {
        let brutto = (netto * vat.factor()).floor() + dec!(0.99);

        Self {
            netto: round2(brutto / vat.factor()),
            brutto,
        }
    }
}
