//! The campaign record and its value types.

mod money;
mod status;

pub use money::{Money, MoneyError, DECIMAL_PLACES, MAX_INTEGER_DIGITS};
pub use status::{CampaignStatus, UnknownStatus};

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Upper bound on `name`, in characters.
pub const NAME_MAX_CHARS: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub budget: Money,
    pub spend: Money,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields of a campaign after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignDraft {
    pub name: String,
    pub budget: Money,
    pub spend: Money,
    pub status: CampaignStatus,
}

/// Fields supplied to a partial update; `None` leaves the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub budget: Option<Money>,
    pub spend: Option<Money>,
    pub status: Option<CampaignStatus>,
}

impl Campaign {
    /// New record with a fresh id; `created_at == updated_at`.
    pub fn create(draft: CampaignDraft, now: DateTime<Utc>) -> Self {
        let now = stored_precision(now);
        Campaign {
            id: Uuid::new_v4(),
            name: draft.name,
            budget: draft.budget,
            spend: draft.spend,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies supplied fields and refreshes `updated_at`, never earlier than `created_at`.
    pub fn apply(&mut self, patch: CampaignPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(spend) = patch.spend {
            self.spend = spend;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = stored_precision(now).max(self.created_at);
    }
}

impl From<CampaignDraft> for CampaignPatch {
    fn from(draft: CampaignDraft) -> Self {
        CampaignPatch {
            name: Some(draft.name),
            budget: Some(draft.budget),
            spend: Some(draft.spend),
            status: Some(draft.status),
        }
    }
}

/// PostgreSQL keeps microseconds; truncate so stored and returned values agree.
pub fn stored_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(6)
}
