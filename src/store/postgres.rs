//! PostgreSQL-backed campaign store.

use super::{CampaignStore, PageRows};
use crate::error::{AppError, ConfigError};
use crate::model::{Campaign, CampaignStatus, Money};
use crate::query::ListQuery;
use crate::sql::{self, to_arguments, BindValue, QueryBuf};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    id: Uuid,
    name: String,
    budget: Decimal,
    spend: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = AppError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| AppError::Store(format!("campaign {} has invalid {}", row.id, what));
        Ok(Campaign {
            id: row.id,
            budget: Money::new(row.budget).map_err(|_| corrupt("budget"))?,
            spend: Money::new(row.spend).map_err(|_| corrupt("spend"))?,
            status: CampaignStatus::from_str(&row.status).map_err(|_| corrupt("status"))?,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgCampaignStore {
    pool: PgPool,
}

impl PgCampaignStore {
    pub fn new(pool: PgPool) -> Self {
        PgCampaignStore { pool }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Campaign>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = sqlx::query_as_with::<_, CampaignRow, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Campaign::try_from).transpose()
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = sqlx::query_with(&q.sql, to_arguments(&q.params)?)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CampaignStore for PgCampaignStore {
    async fn insert(&self, campaign: &Campaign) -> Result<Campaign, AppError> {
        let q = sql::insert(campaign);
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Campaign>, AppError> {
        let mut q = sql::select_by_id();
        q.params.push(BindValue::Uuid(id));
        self.fetch_optional(&q).await
    }

    async fn update(&self, campaign: &Campaign) -> Result<Option<Campaign>, AppError> {
        let q = sql::update(campaign);
        self.fetch_optional(&q).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut q = sql::delete();
        q.params.push(BindValue::Uuid(id));
        Ok(self.execute(&q).await? > 0)
    }

    async fn list(&self, query: &ListQuery, limit: u64, offset: u64) -> Result<PageRows, AppError> {
        let count_q = sql::count(query);
        tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
        let count: i64 = sqlx::query_scalar_with(&count_q.sql, to_arguments(&count_q.params)?)
            .fetch_one(&self.pool)
            .await?;

        let page_q = sql::select_page(query, limit, offset);
        tracing::debug!(sql = %page_q.sql, params = ?page_q.params, "query");
        let rows = sqlx::query_as_with::<_, CampaignRow, _>(&page_q.sql, to_arguments(&page_q.params)?)
            .fetch_all(&self.pool)
            .await?;
        let rows = rows
            .into_iter()
            .map(Campaign::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageRows {
            count: u64::try_from(count).unwrap_or(0),
            rows,
        })
    }

    async fn clear(&self) -> Result<u64, AppError> {
        self.execute(&sql::delete_all()).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the database named in `database_url` when it does not exist yet.
/// Connects to the `postgres` maintenance database on the same server to do so.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| invalid_url("no database path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name.trim(), Some(query)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(query) => format!("{}postgres?{}", base, query),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn invalid_url(reason: String) -> AppError {
    AppError::Config(ConfigError::Invalid {
        name: "DATABASE_URL",
        reason,
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
