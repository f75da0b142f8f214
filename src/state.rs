//! Shared application state for all routes.

use crate::config::Settings;
use crate::query::PageLimits;
use crate::store::CampaignStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CampaignStore>,
    pub page_limits: PageLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn CampaignStore>, settings: &Settings) -> Self {
        AppState {
            store,
            page_limits: settings.page_limits(),
        }
    }
}
