//! Persistence contract for sales and its `SeaORM` implementation.
//!
//! The dashboard only needs four calls: list everything newest first, insert, update by
//! id and delete by id. Rows store the event date as ISO `YYYY-MM-DD`; sales handed
//! back to the caller carry the `DD/MM/YY` label instead.

use crate::{
    core::{
        dates,
        sale::{DeliveryStatus, Sale, SaleDraft},
    },
    entities::{SaleColumn, SaleEntity, sale},
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{NotSet, Set, Unchanged},
    DbErr, QueryOrder,
    prelude::*,
};
use tracing::{debug, instrument, warn};

/// Storage operations the dashboard session relies on.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// All sales, most recently created first
    async fn list_all(&self) -> Result<Vec<Sale>>;

    /// Stores a new sale
    async fn insert(&self, sale: &Sale) -> Result<()>;

    /// Overwrites the stored sale with the same id.
    ///
    /// Returns [`Error::SaleNotFound`] when no row has that id.
    async fn update(&self, sale: &Sale) -> Result<()>;

    /// Deletes by id. Returns whether a row was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// [`SaleRepository`] over the `sales` table.
#[derive(Debug, Clone)]
pub struct SeaOrmSaleRepository {
    db: DatabaseConnection,
}

impl SeaOrmSaleRepository {
    /// Wraps an open connection. The `sales` table must exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl SaleRepository for SeaOrmSaleRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Sale>> {
        let rows = SaleEntity::find()
            .order_by_desc(SaleColumn::CreatedAt)
            .all(&self.db)
            .await?;
        debug!("Fetched {} sale rows", rows.len());

        Ok(rows.into_iter().map(sale_from_row).collect())
    }

    #[instrument(skip(self, sale), fields(id = sale.id()))]
    async fn insert(&self, sale: &Sale) -> Result<()> {
        let mut row = active_model_from_sale(sale);
        row.id = Set(sale.id().to_string());
        row.created_at = Set(chrono::Utc::now());

        SaleEntity::insert(row)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, sale), fields(id = sale.id()))]
    async fn update(&self, sale: &Sale) -> Result<()> {
        match active_model_from_sale(sale).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(Error::SaleNotFound {
                id: sale.id().to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool> {
        let result = SaleEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

/// Maps a sale onto a row. `created_at` is left unset so updates keep the original.
fn active_model_from_sale(sale: &Sale) -> sale::ActiveModel {
    sale::ActiveModel {
        id: Unchanged(sale.id().to_string()),
        conta: Set(sale.account.clone()),
        setor: Set(sale.sector.clone()),
        custo_setor: Set(sale.sector_cost()),
        custo_plano: Set(sale.plan_cost()),
        valor_venda: Set(sale.sale_price()),
        lucro: Set(sale.profit()),
        nome_pix: Set(sale.buyer_name.clone()),
        status: Set(sale.status.as_str().to_string()),
        contato: Set(sale.contact.clone()),
        pagamento: Set(sale.payment_method.clone()),
        data: Set(dates::label_to_iso(&sale.event_date)),
        created_at: NotSet,
    }
}

/// Maps a row onto a sale, normalizing the date and recomputing the profit.
///
/// Rows the sale form would reject are still loaded, with a warning.
fn sale_from_row(row: sale::Model) -> Sale {
    let status = row.status.parse::<DeliveryStatus>().unwrap_or_else(|_| {
        warn!(id = %row.id, status = %row.status, "Unknown status, treating as pending");
        DeliveryStatus::Pending
    });

    let draft = SaleDraft {
        account: row.conta,
        sector: row.setor,
        sector_cost: row.custo_setor,
        plan_cost: row.custo_plano,
        sale_price: row.valor_venda,
        buyer_name: row.nome_pix,
        status,
        contact: row.contato,
        payment_method: row.pagamento,
        event_date: dates::iso_to_label(&row.data),
    };
    if let Err(e) = draft.validate() {
        warn!(id = %row.id, "Stored sale is incomplete, loading as is: {e}");
    }

    let sale = Sale::from_stored(row.id, draft);
    if (sale.profit() - row.lucro).abs() > f64::EPSILON {
        debug!(id = sale.id(), stored = row.lucro, "Stored profit differs, recomputed");
    }
    sale
}
