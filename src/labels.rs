//! Price labels

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};

use crate::{prices::PricePair, products::Product, rounding::round2};

/// One price-label (cenówka) line: what the shelf edge shows for a product
/// at a location.
///
/// Holds computed values only; rendering to PDF or CSV is someone else's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLabel {
    /// Product name, simplified when a label name exists.
    pub name: String,

    /// Brutto sell price in effect at the location.
    pub brutto: Decimal,

    /// Normalized unit price and its quote base (e.g. `"100 g"`), when the
    /// product's contents are known.
    pub unit_price: Option<(Decimal, &'static str)>,
}

impl PriceLabel {
    /// Builds the label line for a product with the given effective price.
    pub fn new(product: &Product, effective: PricePair) -> Self {
        let unit_price = product.contents.and_then(|contents| {
            let base = contents.unit.quote_base()?;
            let per = product.unit_price(effective.brutto);

            (per > Decimal::ZERO).then_some((round2(per), base))
        });

        Self {
            name: product.display_name().to_owned(),
            brutto: effective.brutto,
            unit_price,
        }
    }
}

impl fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = Money::from_minor(minor_units(self.brutto), iso::PLN);

        write!(f, "{} {price}", self.name)?;

        if let Some((per, base)) = self.unit_price {
            let per = Money::from_minor(minor_units(per), iso::PLN);

            write!(f, " ({per}/{base})")?;
        }

        Ok(())
    }
}

/// Grosze for a two-decimal zloty amount.
fn minor_units(amount: Decimal) -> i64 {
    (round2(amount) * Decimal::ONE_HUNDRED).to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use crate::{
        products::Contents,
        unit::Unit,
        vat::{VatRate, VatRateError},
    };

    use super::*;

    fn jar_of_honey() -> Result<Product, VatRateError> {
        let vat = VatRate::new(8)?;

        Ok(Product {
            name: "Miód lipowy, słoik 250 g".to_owned(),
            label_name: Some("Miód lipowy".to_owned()),
            purchase: None,
            default_sell: PricePair::from_netto(dec!(18.50), vat),
            vat,
            package_quantity: None,
            contents: Some(Contents {
                amount: dec!(250),
                unit: Unit::Grams,
            }),
        })
    }

    #[test]
    fn label_uses_the_simplified_name_and_unit_price() -> TestResult {
        let product = jar_of_honey()?;
        let label = PriceLabel::new(&product, product.default_sell);

        assert_eq!(label.name, "Miód lipowy");
        assert_eq!(label.brutto, dec!(19.98));
        // 19.98 over 250 g -> 7.99 per 100 g.
        assert_eq!(label.unit_price, Some((dec!(7.99), "100 g")));

        Ok(())
    }

    #[test]
    fn label_suppresses_unit_price_without_contents() -> TestResult {
        let mut product = jar_of_honey()?;
        product.contents = None;

        let label = PriceLabel::new(&product, product.default_sell);

        assert_eq!(label.unit_price, None);

        Ok(())
    }

    #[test]
    fn display_mentions_name_and_quote_base() -> TestResult {
        let product = jar_of_honey()?;
        let text = PriceLabel::new(&product, product.default_sell).to_string();

        assert!(text.contains("Miód lipowy"), "missing name: {text}");
        assert!(text.contains("100 g"), "missing quote base: {text}");

        Ok(())
    }
}
