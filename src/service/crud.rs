//! Campaign operations: validation first, then a single store write.

use crate::error::AppError;
use crate::model::{Campaign, CampaignDraft, CampaignPatch};
use crate::query::{ListQuery, PageRequest};
use crate::store::{CampaignStore, PageRows};
use chrono::Utc;
use uuid::Uuid;

pub struct CrudService;

impl CrudService {
    pub async fn create(store: &dyn CampaignStore, draft: CampaignDraft) -> Result<Campaign, AppError> {
        let campaign = Campaign::create(draft, Utc::now());
        let stored = store.insert(&campaign).await?;
        tracing::info!(id = %stored.id, name = %stored.name, "campaign created");
        Ok(stored)
    }

    pub async fn read(store: &dyn CampaignStore, id: Uuid) -> Result<Campaign, AppError> {
        store.fetch(id).await?.ok_or_else(|| not_found(id))
    }

    /// Shared by replace and partial update; the caller decides which fields the patch carries.
    pub async fn update(
        store: &dyn CampaignStore,
        id: Uuid,
        patch: CampaignPatch,
    ) -> Result<Campaign, AppError> {
        let mut campaign = Self::read(store, id).await?;
        campaign.apply(patch, Utc::now());
        // The row can vanish between read and write; never recreate it.
        let stored = store.update(&campaign).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(id = %stored.id, "campaign updated");
        Ok(stored)
    }

    pub async fn delete(store: &dyn CampaignStore, id: Uuid) -> Result<(), AppError> {
        if !store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id = %id, "campaign deleted");
        Ok(())
    }

    /// Filter and search, then order, then paginate. A page past the end is empty, not an error.
    pub async fn list(
        store: &dyn CampaignStore,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<PageRows, AppError> {
        store.list(query, page.size, page.offset()).await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("campaign {}", id))
}
