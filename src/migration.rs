//! Apply the campaign schema to the database: table, constraints, indexes.
//! Every statement is idempotent so it can run on each start.

use crate::error::AppError;
use crate::model::{CampaignStatus, NAME_MAX_CHARS};
use crate::sql::CAMPAIGN_TABLE;
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// DDL in execution order.
pub fn schema_statements() -> Vec<String> {
    let table = quote(CAMPAIGN_TABLE);
    let statuses = CampaignStatus::ALL
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                "id" UUID PRIMARY KEY,
                "name" VARCHAR({name_max}) NOT NULL,
                "budget" NUMERIC(12, 2) NOT NULL CHECK ("budget" >= 0),
                "spend" NUMERIC(12, 2) NOT NULL CHECK ("spend" >= 0),
                "status" VARCHAR(10) NOT NULL DEFAULT 'active' CHECK ("status" IN ({statuses})),
                "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CHECK ("updated_at" >= "created_at")
            )
            "#,
            table = table,
            name_max = NAME_MAX_CHARS,
            statuses = statuses,
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quote(&format!("{}_status_idx", CAMPAIGN_TABLE)),
            table,
            quote("status")
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quote(&format!("{}_created_at_idx", CAMPAIGN_TABLE)),
            table,
            quote("created_at")
        ),
    ]
}

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in schema_statements() {
        tracing::debug!(sql = %ddl.trim(), "migration");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(table = CAMPAIGN_TABLE, "schema up to date");
    Ok(())
}
