//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the campaigns table.

use super::params::BindValue;
use crate::model::Campaign;
use crate::query::{ListQuery, OrderField};

pub const CAMPAIGN_TABLE: &str = "campaigns";

const COLUMNS: [&str; 7] = [
    "id",
    "name",
    "budget",
    "spend",
    "status",
    "created_at",
    "updated_at",
];

/// Quote identifier for PostgreSQL (safe: only from constants).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list() -> String {
    COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        self.params.push(v);
        self.params.len() as u32
    }

    /// WHERE clause for status and search; params bound in that order.
    fn push_filters(&mut self, query: &ListQuery) -> String {
        let mut where_parts = Vec::new();
        if let Some(status) = query.status {
            let n = self.push_param(BindValue::Text(status.as_str().to_string()));
            where_parts.push(format!("{} = ${}", quoted("status"), n));
        }
        if let Some(term) = &query.search {
            let n = self.push_param(BindValue::Text(like_pattern(term)));
            where_parts.push(format!("{} ILIKE ${} ESCAPE '\\'", quoted("name"), n));
        }
        if where_parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_parts.join(" AND "))
        }
    }
}

/// SELECT by primary key. Caller adds id as sole param.
pub fn select_by_id() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(),
        quoted(CAMPAIGN_TABLE),
        quoted("id")
    );
    q
}

/// SELECT page: filters, ORDER BY requested field then id, LIMIT/OFFSET.
pub fn select_page(query: &ListQuery, limit: u64, offset: u64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = q.push_filters(query);
    let direction = if query.ordering.descending { "DESC" } else { "ASC" };
    let mut sort_key = quoted(query.ordering.field.column());
    if query.ordering.field == OrderField::Name {
        sort_key.push_str(" COLLATE \"C\"");
    }
    let order_clause = format!(
        " ORDER BY {} {}, {} {}",
        sort_key,
        direction,
        quoted("id"),
        direction
    );
    let limit_param = q.push_param(BindValue::BigInt(clamp_i64(limit)));
    let offset_param = q.push_param(BindValue::BigInt(clamp_i64(offset)));
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT ${} OFFSET ${}",
        column_list(),
        quoted(CAMPAIGN_TABLE),
        where_clause,
        order_clause,
        limit_param,
        offset_param
    );
    q
}

/// COUNT(*) of rows matching the same filters as [`select_page`].
pub fn count(query: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = q.push_filters(query);
    q.sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        quoted(CAMPAIGN_TABLE),
        where_clause
    );
    q
}

/// INSERT every column, returning the stored row.
pub fn insert(campaign: &Campaign) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values = [
        BindValue::Uuid(campaign.id),
        BindValue::Text(campaign.name.clone()),
        BindValue::Decimal(campaign.budget.get()),
        BindValue::Decimal(campaign.spend.get()),
        BindValue::Text(campaign.status.as_str().to_string()),
        BindValue::Timestamp(campaign.created_at),
        BindValue::Timestamp(campaign.updated_at),
    ];
    let placeholders: Vec<String> = values
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(CAMPAIGN_TABLE),
        column_list(),
        placeholders.join(", "),
        column_list()
    );
    q
}

/// UPDATE every mutable column by id. `created_at` is never written.
pub fn update(campaign: &Campaign) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets = [
        ("name", BindValue::Text(campaign.name.clone())),
        ("budget", BindValue::Decimal(campaign.budget.get())),
        ("spend", BindValue::Decimal(campaign.spend.get())),
        ("status", BindValue::Text(campaign.status.as_str().to_string())),
        ("updated_at", BindValue::Timestamp(campaign.updated_at)),
    ];
    let set_clause: Vec<String> = sets
        .into_iter()
        .map(|(col, v)| format!("{} = ${}", quoted(col), q.push_param(v)))
        .collect();
    let id_param = q.push_param(BindValue::Uuid(campaign.id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(CAMPAIGN_TABLE),
        set_clause.join(", "),
        quoted("id"),
        id_param,
        column_list()
    );
    q
}

/// DELETE by id. Caller adds id as sole param.
pub fn delete() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(CAMPAIGN_TABLE),
        quoted("id")
    );
    q
}

/// DELETE every row (sample data reseeding).
pub fn delete_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", quoted(CAMPAIGN_TABLE));
    q
}

fn clamp_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
