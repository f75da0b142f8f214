//! Startup shared by the server and seed binaries: env, logging, store selection.

use campaign_api::{
    apply_migrations, ensure_database_exists, AppError, CampaignStore, MemoryCampaignStore,
    PgCampaignStore, Settings, StoreBackend,
};
use std::sync::Arc;

pub const DEFAULT_LOG_FILTER: &str = "campaign_api=info,campaign_server=info,tower_http=info";

/// Load `.env`, install the tracing subscriber and read settings.
pub fn init() -> Result<Settings, AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
    Ok(Settings::from_env()?)
}

/// Open the configured store. For PostgreSQL the database is created if missing and the schema applied.
pub async fn open_store(settings: &Settings) -> Result<Arc<dyn CampaignStore>, AppError> {
    match settings.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryCampaignStore::new()))
        }
        StoreBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            apply_migrations(&pool).await?;
            Ok(Arc::new(PgCampaignStore::new(pool)))
        }
    }
}
