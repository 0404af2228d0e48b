//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    book::PriceBook,
    fixtures::catalog::CatalogFixture,
    products::ProductKey,
    vat::VatRateError,
};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid VAT percentage
    #[error(transparent)]
    Vat(#[from] VatRateError),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// A loaded fixture set: a price book plus string-id lookups into it.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    book: PriceBook,

    /// Fixture id -> catalog key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,
}

impl Fixture {
    /// Creates an empty fixture with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Creates an empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            book: PriceBook::new(),
            product_keys: FxHashMap::default(),
        }
    }

    /// Loads a complete fixture set by name.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the catalog file cannot be read or
    /// parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();
        fixture.load_catalog(name)?;

        Ok(fixture)
    }

    /// Loads a product catalog from a YAML fixture file into the book.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read, parsed, or
    /// contains invalid prices or VAT rates.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for (id, product_fixture) in fixture.products {
            let product = product_fixture.into_product()?;
            let key = self.book.add_product(product);

            self.product_keys.insert(id, key);
        }

        Ok(self)
    }

    /// Resolves a fixture id to its catalog key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] for an unknown id.
    pub fn product_key(&self, id: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(id)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_owned()))
    }

    /// The loaded price book.
    pub fn book(&self) -> &PriceBook {
        &self.book
    }

    /// The loaded price book, mutably.
    pub fn book_mut(&mut self) -> &mut PriceBook {
        &mut self.book
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
