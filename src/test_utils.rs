//! Shared test utilities for `TicketTally`.
//!
//! Helpers for setting up in-memory databases, building sales with sensible defaults
//! and a repository that fails every call.

use crate::{
    core::{
        repository::{SaleRepository, SeaOrmSaleRepository},
        sale::{DeliveryStatus, Sale, SaleDraft},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the `sales` table.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A repository over a fresh in-memory database.
pub async fn setup_test_repository() -> Result<SeaOrmSaleRepository> {
    Ok(SeaOrmSaleRepository::new(setup_test_db().await?))
}

/// Builds a draft with sensible defaults.
///
/// # Defaults
/// * `account`: `"conta-teste"`
/// * `contact`: `"+55 11 90000-0000"`
/// * `status`: pending
/// * `payment_method`: `"Nubank"`
/// * `event_date`: `"02/11/25"`
pub fn sample_draft(
    sector: &str,
    buyer: &str,
    sale_price: f64,
    sector_cost: f64,
    plan_cost: f64,
) -> SaleDraft {
    SaleDraft {
        account: "conta-teste".to_string(),
        sector: sector.to_string(),
        sector_cost,
        plan_cost,
        sale_price,
        buyer_name: buyer.to_string(),
        status: DeliveryStatus::Pending,
        contact: "+55 11 90000-0000".to_string(),
        payment_method: "Nubank".to_string(),
        event_date: "02/11/25".to_string(),
    }
}

/// Builds a sale with a fresh id from [`sample_draft`].
///
/// # Panics
/// Panics on negative or non-finite amounts.
#[allow(clippy::unwrap_used)]
pub fn sample_sale(
    sector: &str,
    buyer: &str,
    sale_price: f64,
    sector_cost: f64,
    plan_cost: f64,
) -> Sale {
    Sale::create(sample_draft(sector, buyer, sale_price, sector_cost, plan_cost)).unwrap()
}

/// The three-sale reference ledger:
/// * A, X: 100 - 10 - 10 = 80
/// * A, X: 50 - 5 - 5 = 40
/// * B, Y: 200 - 20 - 0 = 180
pub fn sample_sales() -> Vec<Sale> {
    vec![
        sample_sale("A", "X", 100.0, 10.0, 10.0),
        sample_sale("A", "X", 50.0, 5.0, 5.0),
        sample_sale("B", "Y", 200.0, 20.0, 0.0),
    ]
}

/// A repository whose every call fails with a database error.
#[derive(Debug, Clone, Copy)]
pub struct FailingRepository;

fn offline() -> Error {
    Error::Database(DbErr::Custom("repository offline".to_string()))
}

#[async_trait]
impl SaleRepository for FailingRepository {
    async fn list_all(&self) -> Result<Vec<Sale>> {
        Err(offline())
    }

    async fn insert(&self, _sale: &Sale) -> Result<()> {
        Err(offline())
    }

    async fn update(&self, _sale: &Sale) -> Result<()> {
        Err(offline())
    }

    async fn delete(&self, _id: &str) -> Result<bool> {
        Err(offline())
    }
}
