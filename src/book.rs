//! Location price book

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    change::{PriceChange, PriceChangeError},
    prices::PricePair,
    products::{Product, ProductKey},
};

new_key_type! {
    /// Location Key
    pub struct LocationKey;
}

/// Where a location price came from.
///
/// Seeding routines may only replace [`PriceSource::ApiSeed`] and
/// [`PriceSource::AutoInit`] rows; anything a human set, singly or in bulk,
/// stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Written by the upstream product API.
    ApiSeed,

    /// Written by automatic initialization of a new location.
    AutoInit,

    /// Set by a user through a bulk price change.
    UserBulk,

    /// Set by a user editing one product by hand.
    UserManual,
}

impl PriceSource {
    /// True for rows created by a deliberate human edit.
    pub fn is_user_edit(self) -> bool {
        matches!(self, PriceSource::UserBulk | PriceSource::UserManual)
    }
}

/// A per-location override of a product's sell price.
///
/// At most one exists per (product, location); its absence means the
/// product's default sell price applies at that location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPrice {
    /// The overriding sell price.
    pub price: PricePair,

    /// Who wrote this row.
    pub source: PriceSource,
}

/// Kind of change recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A single product edited by hand.
    Manual,

    /// Part of a bulk price change.
    Bulk,
}

/// Append-only audit record for one price change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    /// When the change was applied.
    pub at: DateTime<Utc>,

    /// Price before the change.
    pub old: PricePair,

    /// Price after the change.
    pub new: PricePair,

    /// Manual or bulk.
    pub kind: ChangeKind,

    /// Identifier of the acting user.
    pub user: String,

    /// Free-text reason entered with the change.
    pub reason: String,
}

/// Outcome of a bulk price change over a selection of products.
///
/// Every selected product lands in exactly one of the two counters, so
/// `success_count + error_count` equals the selection size.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Products whose price was updated.
    pub success_count: usize,

    /// Products skipped because their change failed.
    pub error_count: usize,

    /// The per-product failures, in selection order.
    pub failures: SmallVec<[(ProductKey, BookError); 4]>,
}

impl BatchReport {
    fn success(&mut self) {
        self.success_count += 1;
    }

    fn failure(&mut self, product: ProductKey, error: BookError) {
        self.error_count += 1;
        self.failures.push((product, error));
    }
}

/// Outcome of seeding a location: rows written vs. rows kept because a user
/// had edited them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Overrides written by the seeding pass.
    pub written: usize,

    /// Overrides left untouched because their source was a user edit.
    pub kept: usize,
}

/// Errors from price book operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    /// The product key is not in the catalog.
    #[error("unknown product")]
    UnknownProduct,

    /// The location key is not registered.
    #[error("unknown location")]
    UnknownLocation,

    /// A seeding pass was asked to write user-sourced rows.
    #[error("seed source must be api_seed or auto_init, got {0:?}")]
    UserSourcedSeed(PriceSource),

    /// A rejected or failed price change.
    #[error(transparent)]
    Change(#[from] PriceChangeError),
}

/// In-memory price book: the product catalog, locations, per-location sell
/// price overrides and their change history.
#[derive(Debug, Default)]
pub struct PriceBook {
    products: SlotMap<ProductKey, Product>,
    locations: SlotMap<LocationKey, String>,
    overrides: FxHashMap<(LocationKey, ProductKey), LocationPrice>,
    history: FxHashMap<(LocationKey, ProductKey), Vec<PriceHistoryEntry>>,
}

impl PriceBook {
    /// Creates an empty price book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product to the catalog.
    pub fn add_product(&mut self, product: Product) -> ProductKey {
        self.products.insert(product)
    }

    /// Registers a location under a display name.
    pub fn add_location(&mut self, name: impl Into<String>) -> LocationKey {
        self.locations.insert(name.into())
    }

    /// Removes a product from the catalog, e.g. during a catalog refresh.
    ///
    /// Its location overrides and history go with it; selections still
    /// holding the key see a per-item [`BookError::UnknownProduct`] failure.
    pub fn remove_product(&mut self, key: ProductKey) -> Option<Product> {
        let removed = self.products.remove(key)?;

        self.overrides.retain(|&(_, product), _| product != key);
        self.history.retain(|&(_, product), _| product != key);

        Some(removed)
    }

    /// Looks up a product.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Iterates the catalog in insertion order.
    pub fn products(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.products.iter()
    }

    /// The override row for a (location, product) pair, if one exists.
    pub fn override_for(&self, location: LocationKey, product: ProductKey) -> Option<&LocationPrice> {
        self.overrides.get(&(location, product))
    }

    /// The sell price in effect at a location: the override if present,
    /// otherwise the product's default sell price.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::UnknownLocation`] or [`BookError::UnknownProduct`]
    /// for stale keys.
    pub fn effective_price(
        &self,
        location: LocationKey,
        product: ProductKey,
    ) -> Result<PricePair, BookError> {
        if !self.locations.contains_key(location) {
            return Err(BookError::UnknownLocation);
        }

        let default_sell = self
            .products
            .get(product)
            .ok_or(BookError::UnknownProduct)?
            .default_sell;

        Ok(self
            .overrides
            .get(&(location, product))
            .map_or(default_sell, |row| row.price))
    }

    /// Change history for a (location, product) pair, oldest first.
    pub fn history(&self, location: LocationKey, product: ProductKey) -> &[PriceHistoryEntry] {
        self.history
            .get(&(location, product))
            .map_or(&[], Vec::as_slice)
    }

    /// Sets one product's price at a location by hand.
    ///
    /// Upserts a [`PriceSource::UserManual`] override and appends a
    /// [`ChangeKind::Manual`] history entry.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::UnknownLocation`] or [`BookError::UnknownProduct`]
    /// for stale keys.
    pub fn set_manual_price(
        &mut self,
        location: LocationKey,
        product: ProductKey,
        price: PricePair,
        user: &str,
        reason: &str,
    ) -> Result<(), BookError> {
        let old = self.effective_price(location, product)?;

        self.overrides.insert(
            (location, product),
            LocationPrice {
                price,
                source: PriceSource::UserManual,
            },
        );
        self.record(location, product, old, price, ChangeKind::Manual, user, reason);

        Ok(())
    }

    /// Removes a location's override, reverting the product to its default
    /// sell price. Returns the removed row, if any. History is kept.
    pub fn clear_override(
        &mut self,
        location: LocationKey,
        product: ProductKey,
    ) -> Option<LocationPrice> {
        self.overrides.remove(&(location, product))
    }

    /// Seeds every catalog product's default sell price into a location.
    ///
    /// Rows whose source is a user edit are never overwritten; they are
    /// counted in [`SeedReport::kept`]. Safe to run repeatedly, e.g. after a
    /// catalog refresh.
    ///
    /// # Errors
    ///
    /// - [`BookError::UnknownLocation`] for a stale location key.
    /// - [`BookError::UserSourcedSeed`] when called with a user-edit source;
    ///   seeding passes may only write [`PriceSource::ApiSeed`] or
    ///   [`PriceSource::AutoInit`] rows.
    pub fn seed_defaults(
        &mut self,
        location: LocationKey,
        source: PriceSource,
    ) -> Result<SeedReport, BookError> {
        if source.is_user_edit() {
            return Err(BookError::UserSourcedSeed(source));
        }
        if !self.locations.contains_key(location) {
            return Err(BookError::UnknownLocation);
        }

        let mut report = SeedReport::default();

        for (key, product) in &self.products {
            match self.overrides.get(&(location, key)) {
                Some(existing) if existing.source.is_user_edit() => report.kept += 1,
                _ => {
                    self.overrides.insert(
                        (location, key),
                        LocationPrice {
                            price: product.default_sell,
                            source,
                        },
                    );
                    report.written += 1;
                }
            }
        }

        Ok(report)
    }

    /// Applies one price change across a selection of products at a location.
    ///
    /// The change is validated once up front; an invalid change rejects the
    /// whole operation with nothing applied. After that, every product is
    /// processed independently: per-item failures (missing purchase price in
    /// margin mode, non-positive result, a product removed from the catalog
    /// since the selection was made) are skipped and counted, never
    /// aborting the rest. Successful items get a [`PriceSource::UserBulk`]
    /// override and a [`ChangeKind::Bulk`] history entry.
    ///
    /// # Errors
    ///
    /// - [`BookError::Change`] wrapping `InvalidInput` when the change fails
    ///   validation.
    /// - [`BookError::UnknownLocation`] for a stale location key.
    pub fn apply_bulk(
        &mut self,
        location: LocationKey,
        selection: &[ProductKey],
        change: &PriceChange,
        psychological: bool,
        user: &str,
        reason: &str,
    ) -> Result<BatchReport, BookError> {
        change.validate()?;

        if !self.locations.contains_key(location) {
            return Err(BookError::UnknownLocation);
        }

        let mut report = BatchReport::default();

        for &key in selection {
            let Some(product) = self.products.get(key) else {
                // Selection can outlive a catalog refresh; count it like any
                // other per-item failure.
                report.failure(key, BookError::UnknownProduct);
                continue;
            };

            let vat = product.vat;
            let buy_netto = product.purchase_netto();
            let default_sell = product.default_sell;

            let old = self
                .overrides
                .get(&(location, key))
                .map_or(default_sell, |row| row.price);

            match change.apply(old.netto, vat, buy_netto, psychological) {
                Ok(new) => {
                    self.overrides.insert(
                        (location, key),
                        LocationPrice {
                            price: new,
                            source: PriceSource::UserBulk,
                        },
                    );
                    self.record(location, key, old, new, ChangeKind::Bulk, user, reason);
                    report.success();
                }
                Err(error) => report.failure(key, error.into()),
            }
        }

        Ok(report)
    }

    fn record(
        &mut self,
        location: LocationKey,
        product: ProductKey,
        old: PricePair,
        new: PricePair,
        kind: ChangeKind,
        user: &str,
        reason: &str,
    ) {
        self.history
            .entry((location, product))
            .or_default()
            .push(PriceHistoryEntry {
                at: Utc::now(),
                old,
                new,
                kind,
                user: user.to_owned(),
                reason: reason.to_owned(),
            });
    }
}
