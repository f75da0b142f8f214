use super::{CampaignStore, PageRows};
use crate::error::AppError;
use crate::model::Campaign;
use crate::query::ListQuery;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-process store with the same query semantics as the PostgreSQL one.
#[derive(Debug, Default)]
pub struct MemoryCampaignStore {
    rows: RwLock<HashMap<Uuid, Campaign>>,
}

impl MemoryCampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Campaign>>, AppError> {
        self.rows
            .read()
            .map_err(|_| AppError::Store("campaign store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Campaign>>, AppError> {
        self.rows
            .write()
            .map_err(|_| AppError::Store("campaign store lock poisoned".into()))
    }
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    async fn insert(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        let mut rows = self.write()?;
        if rows.contains_key(&campaign.id) {
            return Err(AppError::Store(format!("duplicate campaign id {}", campaign.id)));
        }
        rows.insert(campaign.id, campaign.clone());
        Ok(campaign.clone())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Campaign>, AppError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn update(&self, campaign: &Campaign) -> Result<Option<Campaign>, AppError> {
        let mut rows = self.write()?;
        let Some(stored) = rows.get_mut(&campaign.id) else {
            return Ok(None);
        };
        stored.name = campaign.name.clone();
        stored.budget = campaign.budget;
        stored.spend = campaign.spend;
        stored.status = campaign.status;
        stored.updated_at = campaign.updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery, limit: u64, offset: u64) -> Result<PageRows, AppError> {
        let mut matching: Vec<Campaign> = self.read()?.values().cloned().collect();
        query.apply(&mut matching);
        let count = matching.len() as u64;
        let rows = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        Ok(PageRows { count, rows })
    }

    async fn clear(&self) -> Result<u64, AppError> {
        let mut rows = self.write()?;
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
