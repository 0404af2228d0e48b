//! Cennik
//!
//! Cennik is a pricing and margin engine for a retail back office:
//! location-scoped sell price overrides with an audit trail, VAT-aware
//! netto/brutto arithmetic, bulk price changes with psychological `.99`
//! rounding, and per-unit price normalisation for shelf-edge labels.

pub mod book;
pub mod change;
pub mod fixtures;
pub mod labels;
pub mod margin;
pub mod prices;
pub mod products;
pub mod rounding;
pub mod unit;
pub mod vat;
