//! Catalog fixture files

use std::{collections::BTreeMap, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    prices::PricePair,
    products::{Contents, Product, parse_package_quantity},
    unit::Unit,
    vat::VatRate,
};

/// On-disk catalog fixture: products keyed by a short fixture id.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in the fixture file, keyed by fixture id.
    pub products: BTreeMap<String, ProductFixture>,
}

/// One product as written in a catalog fixture file.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Full display name.
    pub name: String,

    /// Simplified label name.
    #[serde(default)]
    pub label_name: Option<String>,

    /// VAT percentage; defaults to the standard rate.
    #[serde(default)]
    pub vat: Option<u8>,

    /// Purchase price netto, as a decimal string; omitted when unknown.
    #[serde(default)]
    pub purchase_netto: Option<String>,

    /// Default sell price netto, as a decimal string.
    pub sell_netto: String,

    /// Free-text package description, e.g. `"op. 30 szt."`.
    #[serde(default)]
    pub package: Option<String>,

    /// Package contents.
    #[serde(default)]
    pub contents: Option<ContentsFixture>,
}

/// Contents as written in a fixture file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContentsFixture {
    /// Amount in the given unit.
    pub amount: Decimal,

    /// Unit of measure.
    pub unit: Unit,
}

/// Parses a fixture price string.
pub(crate) fn parse_price(raw: &str) -> Result<Decimal, FixtureError> {
    Decimal::from_str(raw.trim())
        .map_err(|err| FixtureError::InvalidPrice(format!("{raw:?}: {err}")))
}

impl ProductFixture {
    /// Converts the fixture entry into a catalog [`Product`].
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] for unparseable prices or an out-of-range
    /// VAT percentage.
    pub fn into_product(self) -> Result<Product, FixtureError> {
        let vat = match self.vat {
            Some(percent) => VatRate::new(percent)?,
            None => VatRate::default(),
        };

        let purchase = self
            .purchase_netto
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|netto| PricePair::from_netto(netto, vat));

        let default_sell = PricePair::from_netto(parse_price(&self.sell_netto)?, vat);

        Ok(Product {
            name: self.name,
            label_name: self.label_name,
            purchase,
            default_sell,
            vat,
            package_quantity: self.package.as_deref().and_then(parse_package_quantity),
            contents: self.contents.map(|contents| Contents {
                amount: contents.amount,
                unit: contents.unit,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_trims_and_parses() -> TestResult {
        assert_eq!(parse_price(" 12.95 ")?, dec!(12.95));

        Ok(())
    }

    #[test]
    fn parse_price_reports_the_offending_string() {
        assert!(matches!(
            parse_price("tanio"),
            Err(FixtureError::InvalidPrice(message)) if message.contains("tanio")
        ));
    }

    #[test]
    fn into_product_fills_defaults() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(
            "name: \"Apap Extra, 50 tabl.\"\nsell_netto: \"12.95\"\npackage: \"op. 50 tabl.\"\n",
        )?;

        let product = fixture.into_product()?;

        assert_eq!(product.vat.percent(), 23);
        assert_eq!(product.purchase, None);
        assert_eq!(product.default_sell.netto, dec!(12.95));
        assert_eq!(product.package_quantity, Some(50));
        assert_eq!(product.contents, None);

        Ok(())
    }

    #[test]
    fn into_product_rejects_out_of_range_vat() -> TestResult {
        let fixture: ProductFixture =
            serde_norway::from_str("name: X\nsell_netto: \"1.00\"\nvat: 150\n")?;

        assert!(matches!(fixture.into_product(), Err(FixtureError::Vat(_))));

        Ok(())
    }

    #[test]
    fn into_product_rejects_bad_prices() -> TestResult {
        let fixture: ProductFixture =
            serde_norway::from_str("name: X\nsell_netto: \"oops\"\n")?;

        assert!(matches!(
            fixture.into_product(),
            Err(FixtureError::InvalidPrice(_))
        ));

        Ok(())
    }
}
