//! Persistence seam for campaigns.

use crate::error::AppError;
use crate::model::Campaign;
use crate::query::ListQuery;
use async_trait::async_trait;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryCampaignStore;
pub use postgres::{ensure_database_exists, PgCampaignStore};

/// Rows of one page plus the total number of matching rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRows {
    pub count: u64,
    pub rows: Vec<Campaign>,
}

/// Create/read/update/delete by id plus one filtered, ordered, paged query over the table.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Store a new record exactly as given.
    async fn insert(&self, campaign: &Campaign) -> Result<Campaign, AppError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Campaign>, AppError>;

    /// Overwrite mutable fields. `None` when the id no longer exists.
    async fn update(&self, campaign: &Campaign) -> Result<Option<Campaign>, AppError>;

    /// `true` when a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list(&self, query: &ListQuery, limit: u64, offset: u64) -> Result<PageRows, AppError>;

    /// Remove every row; returns how many were removed.
    async fn clear(&self) -> Result<u64, AppError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
