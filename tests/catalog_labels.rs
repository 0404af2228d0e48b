//! Integration test for the catalog fixture and price-label computation.

use rust_decimal::dec;
use testresult::TestResult;

use cennik::{
    book::BookError,
    fixtures::{Fixture, FixtureError},
    labels::PriceLabel,
    unit::{Unit, per_unit, price_for_amount},
};

#[test]
fn pharmacy_catalog_loads_with_derived_brutto_prices() -> TestResult {
    let fixture = Fixture::from_set("pharmacy")?;

    let apap = fixture.product_key("apap")?;
    let product = fixture.book().product(apap).ok_or(BookError::UnknownProduct)?;

    // 12.95 netto at 8% VAT.
    assert_eq!(product.default_sell.brutto, dec!(13.99));
    assert_eq!(product.package_quantity, Some(50));
    assert_eq!(product.vat.percent(), 8);

    // Margin from the fixture purchase price: 12.95 - 8.12 = 4.83 (59%).
    let margin = product.margin_for(product.default_sell.netto);
    assert_eq!(margin.amount, dec!(4.83));
    assert_eq!(margin.percent, 59);

    Ok(())
}

#[test]
fn unknown_fixture_ids_are_reported() -> TestResult {
    let fixture = Fixture::from_set("pharmacy")?;

    assert!(matches!(
        fixture.product_key("maslo"),
        Err(FixtureError::ProductNotFound(id)) if id == "maslo"
    ));

    Ok(())
}

#[test]
fn labels_carry_unit_prices_where_contents_are_known() -> TestResult {
    let fixture = Fixture::from_set("pharmacy")?;
    let book = fixture.book();

    let miod = fixture.product_key("miod")?;
    let product = book.product(miod).ok_or(BookError::UnknownProduct)?;
    let label = PriceLabel::new(product, product.default_sell);

    assert_eq!(label.name, "Miód lipowy");
    // 18.50 netto at 8% -> 19.98 brutto; 19.98 over 250 g -> 7.99 per 100 g.
    assert_eq!(label.brutto, dec!(19.98));
    assert_eq!(label.unit_price, Some((dec!(7.99), "100 g")));

    let termometr = fixture.product_key("termometr")?;
    let product = book.product(termometr).ok_or(BookError::UnknownProduct)?;
    let label = PriceLabel::new(product, product.default_sell);

    assert_eq!(label.unit_price, None);

    Ok(())
}

#[test]
fn unit_prices_round_trip_through_the_fixture_contents() -> TestResult {
    let fixture = Fixture::from_set("pharmacy")?;
    let book = fixture.book();

    for (_, product) in book.products() {
        let Some(contents) = product.contents else {
            continue;
        };

        let price = product.default_sell.brutto;
        let quoted = per_unit(price, contents.amount, contents.unit);
        let back = price_for_amount(quoted, contents.amount, contents.unit);

        assert!(
            (back - price).abs() <= dec!(0.01),
            "{}: {price} came back as {back}",
            product.name
        );
    }

    Ok(())
}

#[test]
fn per_unit_handles_weight_and_count_differently() {
    // Per 100 g for weight, per piece for tablets.
    assert_eq!(per_unit(dec!(100.00), dec!(500), Unit::Grams), dec!(20.00));
    assert_eq!(per_unit(dec!(12.00), dec!(30), Unit::Tablets), dec!(0.40));
    assert_eq!(
        price_for_amount(dec!(20.00), dec!(500), Unit::Grams),
        dec!(100.00)
    );
}
