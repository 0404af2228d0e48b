//! Bulk Price Change Example
//!
//! This example walks the back-office flow for one location: load the
//! pharmacy catalog fixture, seed the location with default prices, apply a
//! margin-mode bulk change with psychological rounding, and print the
//! resulting price labels.
//!
//! Run with: `cargo run --example bulk_change`

use anyhow::{Result, anyhow};

use cennik::{
    book::PriceSource,
    change::PriceChange,
    fixtures::Fixture,
    labels::PriceLabel,
};

/// Bulk Price Change Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let mut fixture = Fixture::from_set("pharmacy")?;

    let selection = [
        fixture.product_key("apap")?,
        fixture.product_key("rutinoscorbin")?,
        fixture.product_key("ibuprom")?,
        fixture.product_key("miod")?,
    ];

    let book = fixture.book_mut();
    let location = book.add_location("Apteka Centrum");

    let seeded = book.seed_defaults(location, PriceSource::AutoInit)?;
    println!("Seeded {} prices ({} kept)", seeded.written, seeded.kept);

    // Reprice the selection to a 60% margin, .99 endings on.
    let change = PriceChange::parse("margin", "60")?;
    let report = book.apply_bulk(location, &selection, &change, true, "demo", "marża 60%")?;

    println!(
        "Applied to {} products, {} skipped",
        report.success_count, report.error_count
    );

    for (key, error) in &report.failures {
        let name = book
            .product(*key)
            .map(|product| product.name.as_str())
            .ok_or(anyhow!("failed product not found"))?;

        println!("  skipped {name}: {error}");
    }

    println!("\nLabels:");

    for key in selection {
        let product = book.product(key).ok_or(anyhow!("product not found"))?;
        let effective = book.effective_price(location, key)?;

        println!("  {}", PriceLabel::new(product, effective));
    }

    Ok(())
}
