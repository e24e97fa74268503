//! Derivation pipeline: ledger + filter → filtered view + aggregates.
//!
//! [`derive()`] is a pure recomputation. [`Pipeline`] keeps the last result and reuses it
//! while neither the ledger version nor the filter changed.

use crate::core::{
    aggregate::{Aggregates, ClientStat, KpiSummary, RankingKind, SectorStat},
    filter::FilterConfig,
    sale::Sale,
    store::SaleStore,
};
use serde::Serialize;
use tracing::trace;

/// Everything the dashboard renders for one (ledger, filter) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Sales passing the filter, newest first
    pub sales: Vec<Sale>,
    /// KPIs and rankings over `sales`
    pub aggregates: Aggregates,
}

impl DashboardView {
    /// Headline figures
    #[must_use]
    pub const fn kpis(&self) -> &KpiSummary {
        &self.aggregates.kpis
    }

    /// Sector ranking for `kind`
    #[must_use]
    pub fn sector_ranking(&self, kind: RankingKind) -> &[SectorStat] {
        self.aggregates.sector_ranking(kind)
    }

    /// Top recurring buyers
    #[must_use]
    pub fn top_clients(&self) -> &[ClientStat] {
        &self.aggregates.top_clients
    }
}

/// Filters `sales` and aggregates the result.
#[must_use]
pub fn derive(sales: &[Sale], filter: &FilterConfig) -> DashboardView {
    let filtered = filter.apply(sales);
    let aggregates = Aggregates::compute(&filtered);
    DashboardView {
        sales: filtered,
        aggregates,
    }
}

/// Single-entry memo over [`derive()`], keyed on (ledger version, filter).
#[derive(Debug, Default)]
pub struct Pipeline {
    cached: Option<(u64, FilterConfig, DashboardView)>,
}

impl Pipeline {
    /// An empty pipeline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The view for the current ledger and filter, recomputed only when either changed.
    pub fn view(&mut self, store: &SaleStore, filter: &FilterConfig) -> &DashboardView {
        if !self.is_cached(store, filter) {
            self.cached = None;
        }

        let (_, _, view) = self.cached.get_or_insert_with(|| {
            trace!(version = store.version(), "Recomputing dashboard view");
            (
                store.version(),
                filter.clone(),
                derive(store.sales(), filter),
            )
        });
        view
    }

    /// Drops the cached view.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether a view is cached for this ledger version and filter
    #[must_use]
    pub fn is_cached(&self, store: &SaleStore, filter: &FilterConfig) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|(version, cached, _)| *version == store.version() && cached == filter)
    }
}
