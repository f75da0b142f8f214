//! List query contract: status filter, name search, single-field ordering, page selection.

use crate::error::{AppError, FieldErrors};
use crate::model::{Campaign, CampaignStatus};
use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

pub const STATUS_PARAM: &str = "status";
pub const SEARCH_PARAM: &str = "search";
pub const ORDERING_PARAM: &str = "ordering";
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Fields a client may order by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderField {
    Name,
    Budget,
    Spend,
    Status,
    CreatedAt,
}

impl OrderField {
    pub const ALL: [OrderField; 5] = [
        Self::Name,
        Self::Budget,
        Self::Spend,
        Self::Status,
        Self::CreatedAt,
    ];

    /// Column name; identical to the wire name.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Budget => "budget",
            Self::Spend => "spend",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }

    fn compare(self, a: &Campaign, b: &Campaign) -> CmpOrdering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Budget => a.budget.cmp(&b.budget),
            Self::Spend => a.spend.cmp(&b.spend),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Sort key plus direction. Ties break on id in the same direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ordering {
    pub field: OrderField,
    pub descending: bool,
}

impl Default for Ordering {
    /// Newest first.
    fn default() -> Self {
        Ordering {
            field: OrderField::CreatedAt,
            descending: true,
        }
    }
}

impl Ordering {
    /// `budget` ascending, `-budget` descending. Unknown fields yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        OrderField::from_name(name).map(|field| Ordering { field, descending })
    }

    pub fn compare(&self, a: &Campaign, b: &Campaign) -> CmpOrdering {
        let ord = self.field.compare(a, b).then_with(|| a.id.cmp(&b.id));
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.column())
    }
}

/// Filter, search and ordering; all supplied constraints apply together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Exact match on status.
    pub status: Option<CampaignStatus>,
    /// Case-insensitive substring of `name`.
    pub search: Option<String>,
    pub ordering: Ordering,
}

impl ListQuery {
    pub fn matches(&self, campaign: &Campaign) -> bool {
        if let Some(status) = self.status {
            if campaign.status != status {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !campaign.name.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Filters then sorts in place.
    pub fn apply(&self, campaigns: &mut Vec<Campaign>) {
        campaigns.retain(|c| self.matches(c));
        campaigns.sort_by(|a, b| self.ordering.compare(a, b));
    }
}

/// Page size bounds from settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

/// 1-based page selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn has_next(&self, count: u64) -> bool {
        self.page.saturating_mul(self.size) < count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Parse list query parameters. Empty values count as absent; a status outside the
/// enumeration is a validation error on `status`.
pub fn parse_list_params(
    params: &HashMap<String, String>,
    limits: PageLimits,
) -> Result<(ListQuery, PageRequest), AppError> {
    let get = |key: &str| {
        params
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };

    let query = ListQuery {
        status: get(STATUS_PARAM).map(parse_status_filter).transpose()?,
        search: get(SEARCH_PARAM).map(str::to_string),
        ordering: get(ORDERING_PARAM)
            .and_then(Ordering::parse)
            .unwrap_or_default(),
    };

    let page = match get(PAGE_PARAM) {
        None => 1,
        Some(raw) => positive(raw, PAGE_PARAM)?,
    };
    let size = match get(PAGE_SIZE_PARAM) {
        None => limits.default_size,
        Some(raw) => positive(raw, PAGE_SIZE_PARAM)?.min(limits.max_size),
    };

    Ok((query, PageRequest { page, size }))
}

fn parse_status_filter(raw: &str) -> Result<CampaignStatus, AppError> {
    raw.parse().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.add(
            STATUS_PARAM,
            format!(
                "Select a valid choice. {} is not one of the available choices.",
                raw
            ),
        );
        AppError::Validation(errors)
    })
}

fn positive(raw: &str, name: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| AppError::MalformedRequest(format!("invalid {}: {}", name, raw)))
}
