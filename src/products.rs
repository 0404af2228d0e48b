//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::{
    margin::{Margin, margin},
    prices::PricePair,
    unit::{Unit, per_unit},
    vat::VatRate,
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// How much of which unit a single package holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    /// Amount in the given unit, e.g. `250` for a 250 g jar.
    pub amount: Decimal,

    /// Unit of measure for `amount`.
    pub unit: Unit,
}

/// A sellable catalog item.
///
/// Catalog data is owned by the upstream product API; from the pricing side
/// everything here is read-only except the derived price fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Full display name.
    pub name: String,

    /// Simplified name for price labels, when the full name is too long.
    pub label_name: Option<String>,

    /// Purchase price; absent when the supplier cost is unknown.
    pub purchase: Option<PricePair>,

    /// Default sell price, used wherever no location override exists.
    pub default_sell: PricePair,

    /// VAT rate applied to this product's sell price.
    pub vat: VatRate,

    /// Units per package, parsed from the free-text package field.
    pub package_quantity: Option<u32>,

    /// Package contents, when the catalog records them.
    pub contents: Option<Contents>,
}

impl Product {
    /// The name to print on a price label: the simplified name if present.
    pub fn display_name(&self) -> &str {
        self.label_name.as_deref().unwrap_or(&self.name)
    }

    /// Purchase price netto, when known.
    pub fn purchase_netto(&self) -> Option<Decimal> {
        self.purchase.map(|pair| pair.netto)
    }

    /// Margin of a netto sell price over this product's purchase price.
    pub fn margin_for(&self, sell_netto: Decimal) -> Margin {
        margin(sell_netto, self.purchase_netto())
    }

    /// Normalized unit price for a brutto sell price, `0` when contents are
    /// unknown or not computable.
    pub fn unit_price(&self, sell_brutto: Decimal) -> Decimal {
        self.contents
            .map_or(Decimal::ZERO, |contents| {
                per_unit(sell_brutto, contents.amount, contents.unit)
            })
    }
}

/// Pulls the leading count out of a free-text package description, for
/// example `"op. 30 szt."` -> `30`. Returns `None` when no digits appear.
pub fn parse_package_quantity(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}
