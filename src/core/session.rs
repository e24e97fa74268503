//! Dashboard session - owns the ledger, the active filter and the optional repository.
//!
//! Mutations are applied to the ledger first and then sent to the repository. When
//! the repository call fails the local change is rolled back and the error returned,
//! so the ledger never silently drifts from what is stored. Without a repository the
//! session works purely in memory.

use crate::{
    config::catalog::Catalog,
    core::{
        filter::{self, FilterConfig},
        pipeline::{DashboardView, Pipeline},
        repository::SaleRepository,
        sale::{Sale, SaleDraft},
        store::SaleStore,
    },
    errors::{Error, Result},
};
use tracing::{debug, error, info, instrument, warn};

/// Result of [`DashboardSession::load`]. Every variant leaves the ledger consistent.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The ledger now holds this many sales from the repository
    Loaded(usize),
    /// No repository configured; the ledger is empty
    NotConfigured,
    /// The repository call failed; the ledger is empty
    Failed(Error),
}

/// Result of [`DashboardSession::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The sale was removed
    Deleted,
    /// The confirmation was declined; nothing changed
    Cancelled,
    /// No sale has that id; nothing changed
    NotFound,
}

/// State of one dashboard session.
pub struct DashboardSession {
    store: SaleStore,
    filter: FilterConfig,
    catalog: Catalog,
    repository: Option<Box<dyn SaleRepository>>,
    pipeline: Pipeline,
}

impl std::fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardSession")
            .field("sales", &self.store.len())
            .field("filter", &self.filter)
            .field("persistent", &self.is_persistent())
            .finish_non_exhaustive()
    }
}

impl DashboardSession {
    /// A session with an empty ledger. Call [`Self::load`] to fill it.
    #[must_use]
    pub fn new(catalog: Catalog, repository: Option<Box<dyn SaleRepository>>) -> Self {
        Self {
            store: SaleStore::new(),
            filter: FilterConfig::default(),
            catalog,
            repository,
            pipeline: Pipeline::new(),
        }
    }

    /// An in-memory session seeded with `sales`.
    #[must_use]
    pub fn with_seed(catalog: Catalog, sales: Vec<Sale>) -> Self {
        let mut session = Self::new(catalog, None);
        session.store.replace_all(sales);
        session
    }

    /// The ledger
    #[must_use]
    pub const fn store(&self) -> &SaleStore {
        &self.store
    }

    /// The configured vocabularies
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active filter
    #[must_use]
    pub const fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Replaces the active filter
    pub fn set_filter(&mut self, filter: FilterConfig) {
        debug!(?filter, "Filter changed");
        self.filter = filter;
    }

    /// Whether a repository is configured
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.repository.is_some()
    }

    /// A blank sale form with the catalog defaults
    #[must_use]
    pub fn new_draft(&self) -> SaleDraft {
        SaleDraft::new(&self.catalog)
    }

    /// Date labels for the date filter
    #[must_use]
    pub fn available_dates(&self) -> Vec<String> {
        filter::available_dates(self.store.sales())
    }

    /// The filtered view and its aggregates, recomputed only when needed
    pub fn view(&mut self) -> &DashboardView {
        self.pipeline.view(&self.store, &self.filter)
    }

    /// Replaces the ledger with the repository's contents.
    ///
    /// Never fails: without a repository, or when the call fails, the ledger is emptied.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> LoadOutcome {
        let Some(repository) = self.repository.as_deref() else {
            info!("No repository configured, starting with an empty ledger");
            self.store.clear();
            return LoadOutcome::NotConfigured;
        };

        match repository.list_all().await {
            Ok(sales) => {
                self.store.replace_all(sales);
                info!("Loaded {} sales", self.store.len());
                LoadOutcome::Loaded(self.store.len())
            }
            Err(e) => {
                error!("Failed to load sales: {e}");
                self.store.clear();
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Creates a sale from a draft and puts it at the top of the ledger.
    ///
    /// # Errors
    /// Rejected drafts, and repository failures (after rolling the ledger back).
    #[instrument(skip(self, draft))]
    pub async fn create(&mut self, draft: SaleDraft) -> Result<Sale> {
        self.note_unlisted_terms(&draft);
        let sale = Sale::create(draft)?;
        self.store.prepend(sale.clone())?;

        if let Some(repository) = self.repository.as_deref() {
            if let Err(e) = repository.insert(&sale).await {
                error!(id = sale.id(), "Failed to store new sale, rolling back: {e}");
                self.store.remove(sale.id());
                return Err(e);
            }
        }

        info!(id = sale.id(), "Sale created");
        Ok(sale)
    }

    /// Replaces the sale with the same id.
    ///
    /// Returns `Ok(false)` and changes nothing when the id is unknown.
    ///
    /// # Errors
    /// Repository failures, after restoring the previous value.
    #[instrument(skip(self, sale), fields(id = sale.id()))]
    pub async fn update(&mut self, sale: Sale) -> Result<bool> {
        let Some(previous) = self.store.replace(sale.clone()) else {
            debug!("Update for unknown sale ignored");
            return Ok(false);
        };

        if let Some(repository) = self.repository.as_deref() {
            if let Err(e) = repository.update(&sale).await {
                error!("Failed to store sale update, rolling back: {e}");
                self.store.replace(previous);
                return Err(e);
            }
        }

        info!("Sale updated");
        Ok(true)
    }

    /// Applies an edited form to the sale with `id`.
    ///
    /// # Errors
    /// Rejected drafts and repository failures.
    pub async fn edit(&mut self, id: &str, draft: SaleDraft) -> Result<bool> {
        if self.store.get(id).is_none() {
            return Ok(false);
        }
        self.note_unlisted_terms(&draft);
        let sale = Sale::with_id(id, draft)?;
        self.update(sale).await
    }

    /// Sector and payment method are free text; names outside the catalog are only logged.
    fn note_unlisted_terms(&self, draft: &SaleDraft) {
        if !self.catalog.knows_sector(&draft.sector) {
            debug!(sector = %draft.sector, "Sector is not in the catalog");
        }
        if !self.catalog.knows_payment_method(&draft.payment_method) {
            debug!(method = %draft.payment_method, "Payment method is not in the catalog");
        }
    }

    /// Deletes the sale with `id` once `confirm` approves it.
    ///
    /// `confirm` receives the sale about to be removed; it is not called for an
    /// unknown id.
    ///
    /// # Errors
    /// Repository failures, after putting the sale back where it was.
    #[instrument(skip(self, confirm))]
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(&Sale) -> bool + Send,
    {
        let Some(sale) = self.store.get(id) else {
            debug!("Delete for unknown sale ignored");
            return Ok(DeleteOutcome::NotFound);
        };
        if !confirm(sale) {
            debug!("Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let Some((index, removed)) = self.store.remove(id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        if let Some(repository) = self.repository.as_deref() {
            match repository.delete(id).await {
                Ok(true) => {}
                Ok(false) => warn!("Sale was already gone from the repository"),
                Err(e) => {
                    error!("Failed to delete stored sale, rolling back: {e}");
                    self.store.insert_at(index, removed)?;
                    return Err(e);
                }
            }
        }

        info!("Sale deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
