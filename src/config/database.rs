//! Database configuration module.
//!
//! The persistence collaborator is optional: when `DATABASE_URL` is not set the
//! dashboard runs without one and starts from an empty ledger. When it is set, this
//! module connects and creates the `sales` table from the entity definition using
//! `SeaORM`'s `Schema::create_table_from_entity`.

use crate::entities::SaleEntity;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Environment variable naming the database URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Gets the database URL from the environment, if persistence is configured.
///
/// Blank values count as not configured.
#[must_use]
pub fn get_database_url() -> Option<String> {
    std::env::var(DATABASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Connects to the given database URL and makes sure the `sales` table exists.
#[instrument(skip(database_url))]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    info!("Database connection ready");
    Ok(db)
}

/// Connects using `DATABASE_URL` when it is set.
///
/// Returns `Ok(None)` when persistence is not configured.
pub async fn connect_if_configured() -> Result<Option<DatabaseConnection>> {
    match get_database_url() {
        Some(url) => create_connection(&url).await.map(Some),
        None => {
            info!("{DATABASE_URL_VAR} not set, running without persistence");
            Ok(None)
        }
    }
}

/// Creates the `sales` table from the entity definition if it is missing.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut sales_table = schema.create_table_from_entity(SaleEntity);
    sales_table.if_not_exists();

    db.execute(builder.build(&sales_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SaleModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let rows: Vec<SaleModel> = SaleEntity::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_in_memory() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        let _: Vec<SaleModel> = SaleEntity::find().limit(1).all(&db).await?;
        Ok(())
    }
}
