use std::process::ExitCode;

use dotenvy::dotenv;
use ticket_tally::{
    config::{catalog, database},
    core::{
        filter::FilterConfig,
        report,
        repository::{SaleRepository, SeaOrmSaleRepository},
        session::{DashboardSession, LoadOutcome},
    },
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // 3. Load the sale vocabularies
    let config = catalog::load_config_or_default(catalog::DEFAULT_CONFIG_PATH)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        "Catalog has {} sectors and {} payment methods",
        config.catalog.sectors.len(),
        config.catalog.payment_methods.len()
    );

    // 4. Connect to the database when one is configured
    let repository = database::connect_if_configured()
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?
        .map(|db| Box::new(SeaOrmSaleRepository::new(db)) as Box<dyn SaleRepository>);

    // 5. Load the ledger and print the unfiltered dashboard
    let mut session = DashboardSession::new(config.catalog, repository);
    match session.load().await {
        LoadOutcome::Loaded(count) => info!("Ledger loaded with {count} sales"),
        LoadOutcome::NotConfigured => info!("Running without persistence"),
        LoadOutcome::Failed(e) => warn!("Ledger unavailable, showing an empty dashboard: {e}"),
    }

    session.set_filter(FilterConfig::all());
    let dates = session.available_dates();
    if !dates.is_empty() {
        info!("Games: {}", dates.join(", "));
    }

    println!("{}", report::render_summary(session.view()));
    Ok(())
}
