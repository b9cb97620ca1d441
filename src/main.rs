//! Fleet Rental back-office server
//!
//! REST API for the rental operation. Reads configuration from a TOML
//! file (~/.config/fleet-rental/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use fleet_rental::application::{
    ContractService, CustomerService, PortalService, ReservationService,
    TemplateContractGenerator,
};
use fleet_rental::config::AppConfig;
use fleet_rental::domain::RepositoryProvider;
use fleet_rental::infrastructure::database::migrator::Migrator;
use fleet_rental::infrastructure::LocalFileStore;
use fleet_rental::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use fleet_rental::{
    create_api_router, default_config_path, init_database, ApiContext, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FLEET_RENTAL_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Fleet Rental back-office...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories and services ──────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let files = Arc::new(LocalFileStore::new(
        &app_cfg.files.root_dir,
        &app_cfg.files.public_base_url,
    ));

    let reservations = Arc::new(ReservationService::new(repos.clone(), files.clone()));
    let customers = Arc::new(CustomerService::new(repos.clone(), files));
    let portal = Arc::new(PortalService::new(reservations.clone(), customers.clone()));
    let contracts = Arc::new(ContractService::new(
        repos.clone(),
        Arc::new(TemplateContractGenerator),
    ));

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(ApiContext {
        repos,
        db,
        reservations,
        customers,
        portal,
        contracts,
    });

    let addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
