//! Campaign API: REST backend for marketing campaigns over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreBackend};
pub use error::{AppError, ConfigError, FieldErrors};
pub use migration::apply_migrations;
pub use model::{Campaign, CampaignStatus, Money};
pub use response::PageEnvelope;
pub use routes::{app, campaign_routes, common_routes, API_PREFIX};
pub use service::{CrudService, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, CampaignStore, MemoryCampaignStore, PgCampaignStore};
