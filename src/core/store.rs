//! The in-memory sales ledger.
//!
//! Sales are kept newest first. Every mutation bumps [`SaleStore::version`], which the
//! derivation pipeline uses as its cache key.

use crate::{
    core::sale::Sale,
    errors::{Error, Result},
};
use std::collections::HashSet;
use tracing::warn;

/// Canonical collection of sales, unique by identifier.
#[derive(Debug, Clone, Default)]
pub struct SaleStore {
    sales: Vec<Sale>,
    version: u64,
}

impl SaleStore {
    /// An empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger seeded with `sales`, in the given order.
    ///
    /// Later duplicates of an identifier are dropped.
    #[must_use]
    pub fn with_records(sales: Vec<Sale>) -> Self {
        let mut store = Self::new();
        store.replace_all(sales);
        store
    }

    /// All sales, newest first
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Incremented on every mutation
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of sales
    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Whether the ledger is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Looks a sale up by identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|sale| sale.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sales.iter().position(|sale| sale.id() == id)
    }

    /// Adds a sale at the front.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateSale`] if the identifier is already present.
    pub fn prepend(&mut self, sale: Sale) -> Result<()> {
        self.insert_at(0, sale)
    }

    /// Inserts a sale at `index` (clamped to the end).
    pub(crate) fn insert_at(&mut self, index: usize, sale: Sale) -> Result<()> {
        if self.get(sale.id()).is_some() {
            return Err(Error::DuplicateSale {
                id: sale.id().to_string(),
            });
        }
        let index = index.min(self.sales.len());
        self.sales.insert(index, sale);
        self.bump();
        Ok(())
    }

    /// Replaces the sale with the same identifier in place.
    ///
    /// Returns the previous value, or `None` (and leaves the ledger untouched) when no
    /// sale has that identifier.
    pub fn replace(&mut self, sale: Sale) -> Option<Sale> {
        let index = self.position(sale.id())?;
        let previous = std::mem::replace(&mut self.sales[index], sale);
        self.bump();
        Some(previous)
    }

    /// Removes the sale with the given identifier, returning it with its position.
    pub fn remove(&mut self, id: &str) -> Option<(usize, Sale)> {
        let index = self.position(id)?;
        let sale = self.sales.remove(index);
        self.bump();
        Some((index, sale))
    }

    /// Replaces the whole collection.
    pub fn replace_all(&mut self, sales: Vec<Sale>) {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(sales.len());
        for sale in sales {
            if seen.insert(sale.id().to_string()) {
                unique.push(sale);
            } else {
                warn!("Dropping duplicate sale id {}", sale.id());
            }
        }
        self.sales = unique;
        self.bump();
    }

    /// Empties the ledger.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    const fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sample_sale, sample_sales};

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut store = SaleStore::with_records(sample_sales());
        let newest = sample_sale("C", "Z", 10.0, 0.0, 0.0);
        let id = newest.id().to_string();

        store.prepend(newest).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.sales()[0].id(), id);
    }

    #[test]
    fn test_prepend_rejects_duplicate_id() {
        let sales = sample_sales();
        let mut store = SaleStore::with_records(sales.clone());
        let version = store.version();

        let result = store.prepend(sales[1].clone());
        assert!(matches!(result, Err(Error::DuplicateSale { .. })));
        assert_eq!(store.len(), 3);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_replace_in_place() {
        let sales = sample_sales();
        let mut store = SaleStore::with_records(sales.clone());

        let mut edited = sales[1].clone();
        let mut draft = edited.to_draft();
        draft.sale_price = 500.0;
        edited.apply(draft).unwrap();

        let previous = store.replace(edited).unwrap();
        assert_eq!(previous.sale_price(), 50.0);
        assert_eq!(store.sales()[1].sale_price(), 500.0);
        assert_eq!(store.sales()[1].profit(), 490.0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let sales = sample_sales();
        let mut store = SaleStore::with_records(sales.clone());
        let version = store.version();
        let stranger = sample_sale("Z", "Q", 1.0, 0.0, 0.0);

        assert!(store.replace(stranger).is_none());
        assert_eq!(store.version(), version);
        assert_eq!(store.sales(), sales.as_slice());
    }

    #[test]
    fn test_remove_returns_position() {
        let sales = sample_sales();
        let mut store = SaleStore::with_records(sales.clone());

        let (index, removed) = store.remove(sales[1].id()).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed, sales[1]);
        assert!(store.get(sales[1].id()).is_none());
    }

    #[test]
    fn test_remove_unknown_id_leaves_store_unchanged() {
        let sales = sample_sales();
        let mut store = SaleStore::with_records(sales.clone());
        let version = store.version();

        assert!(store.remove("missing").is_none());
        assert_eq!(store.sales(), sales.as_slice());
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_insert_at_restores_position() {
        let sales = sample_sales();
        let mut store = SaleStore::with_records(sales.clone());
        let (index, removed) = store.remove(sales[1].id()).unwrap();
        store.insert_at(index, removed).unwrap();
        assert_eq!(store.sales(), sales.as_slice());
    }

    #[test]
    fn test_replace_all_drops_duplicates_and_bumps_version() {
        let sales = sample_sales();
        let mut store = SaleStore::new();
        let version = store.version();

        let mut seed = sales.clone();
        seed.push(sales[0].clone());
        store.replace_all(seed);

        assert_eq!(store.sales(), sales.as_slice());
        assert!(store.version() > version);

        store.clear();
        assert!(store.is_empty());
    }
}
