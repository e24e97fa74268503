//! KPI and ranking computation over a filtered list of sales.
//!
//! Grouping uses exact string equality on the sector and buyer names. Rankings sort
//! with a stable sort, so entries that tie keep the order in which their group first
//! appeared in the input.

use crate::core::sale::Sale;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Number of entries in the recurring-client ranking
pub const TOP_CLIENTS: usize = 5;

/// The five headline figures of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Sum of profit
    pub total_profit: f64,
    /// Sum of sector cost plus plan cost
    pub total_cost: f64,
    /// Number of tickets sold
    pub tickets: usize,
    /// Number of distinct buyer names
    pub clients: usize,
    /// Mean sale price, 0 when there are no sales
    pub average_ticket: f64,
}

/// Profit and sale count of one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorStat {
    /// Sector name
    pub sector: String,
    /// Summed profit
    pub profit: f64,
    /// Number of sales
    pub sales: usize,
}

/// Spend and purchase count of one buyer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientStat {
    /// Buyer name
    pub name: String,
    /// Summed sale price
    pub total_spent: f64,
    /// Number of purchases
    pub purchases: usize,
}

/// Which measure a sector ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RankingKind {
    /// Descending summed profit
    Profit,
    /// Descending sale count
    Volume,
}

impl RankingKind {
    /// The value this ranking orders by, as used for bar lengths
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn measure(self, stat: &SectorStat) -> f64 {
        match self {
            Self::Profit => stat.profit,
            Self::Volume => stat.sales as f64,
        }
    }
}

/// Computes the KPI summary.
#[must_use]
pub fn summarize(sales: &[Sale]) -> KpiSummary {
    let mut summary = KpiSummary::default();
    let mut revenue = 0.0;
    let mut buyers = HashSet::new();

    for sale in sales {
        summary.total_profit += sale.profit();
        summary.total_cost += sale.total_cost();
        revenue += sale.sale_price();
        buyers.insert(sale.buyer_name.as_str());
    }

    summary.tickets = sales.len();
    summary.clients = buyers.len();
    summary.average_ticket = average(revenue, sales.len());
    summary
}

#[allow(clippy::cast_precision_loss)]
fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total / count as f64
}

/// Per-sector totals in first-seen order.
#[must_use]
pub fn sector_stats(sales: &[Sale]) -> Vec<SectorStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<SectorStat> = Vec::new();

    for sale in sales {
        let slot = *index.entry(sale.sector.as_str()).or_insert_with(|| {
            stats.push(SectorStat {
                sector: sale.sector.clone(),
                profit: 0.0,
                sales: 0,
            });
            stats.len() - 1
        });
        stats[slot].profit += sale.profit();
        stats[slot].sales += 1;
    }

    stats
}

/// Orders sector totals for the given ranking.
#[must_use]
pub fn rank_sectors(mut stats: Vec<SectorStat>, kind: RankingKind) -> Vec<SectorStat> {
    match kind {
        RankingKind::Profit => stats.sort_by(|a, b| b.profit.total_cmp(&a.profit)),
        RankingKind::Volume => stats.sort_by(|a, b| b.sales.cmp(&a.sales)),
    }
    stats
}

/// Buyers with more than one purchase, highest spend first, at most [`TOP_CLIENTS`].
#[must_use]
pub fn recurring_clients(sales: &[Sale]) -> Vec<ClientStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut clients: Vec<ClientStat> = Vec::new();

    for sale in sales {
        let slot = *index.entry(sale.buyer_name.as_str()).or_insert_with(|| {
            clients.push(ClientStat {
                name: sale.buyer_name.clone(),
                total_spent: 0.0,
                purchases: 0,
            });
            clients.len() - 1
        });
        clients[slot].total_spent += sale.sale_price();
        clients[slot].purchases += 1;
    }

    clients.retain(|client| client.purchases > 1);
    clients.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    clients.truncate(TOP_CLIENTS);
    clients
}

/// Every aggregate the dashboard shows for one filtered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    /// Headline figures
    pub kpis: KpiSummary,
    /// Sectors by descending profit
    pub sectors_by_profit: Vec<SectorStat>,
    /// Sectors by descending sale count
    pub sectors_by_volume: Vec<SectorStat>,
    /// Top recurring buyers
    pub top_clients: Vec<ClientStat>,
}

impl Aggregates {
    /// Computes all aggregates in one go
    #[must_use]
    pub fn compute(sales: &[Sale]) -> Self {
        let stats = sector_stats(sales);
        Self {
            kpis: summarize(sales),
            sectors_by_profit: rank_sectors(stats.clone(), RankingKind::Profit),
            sectors_by_volume: rank_sectors(stats, RankingKind::Volume),
            top_clients: recurring_clients(sales),
        }
    }

    /// The sector ranking for `kind`
    #[must_use]
    pub fn sector_ranking(&self, kind: RankingKind) -> &[SectorStat] {
        match kind {
            RankingKind::Profit => &self.sectors_by_profit,
            RankingKind::Volume => &self.sectors_by_volume,
        }
    }
}
