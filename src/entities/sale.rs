//! Sale entity - One row per ticket sold, as stored by the persistence collaborator.
//!
//! Column names follow the hosted table (`custo_setor`, `nome_pix`, ...). The `data`
//! column holds ISO `YYYY-MM-DD` dates; `created_at` drives the newest-first listing.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier (UUID string generated on create)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Account reference (CPF or account handle) the ticket was bought with
    pub conta: String,
    /// Sector name
    pub setor: String,
    /// Cost paid for the sector ticket
    pub custo_setor: f64,
    /// Cost of the membership plan used for the purchase
    pub custo_plano: f64,
    /// Price the ticket was resold for
    pub valor_venda: f64,
    /// `valor_venda - custo_setor - custo_plano`
    pub lucro: f64,
    /// Buyer name as shown on the PIX transfer
    pub nome_pix: String,
    /// Delivery status: `"ENVIADO"` or `"PENDENTE"`
    pub status: String,
    /// Buyer contact (phone or handle)
    pub contato: String,
    /// Payment method / bank name
    pub pagamento: String,
    /// Event date, ISO `YYYY-MM-DD`
    pub data: String,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
}

/// Sales have no relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
