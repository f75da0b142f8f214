//! Typed bind values for campaign statements.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;
use uuid::Uuid;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Uuid(Uuid),
    Text(String),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
    BigInt(i64),
}

impl BindValue {
    fn add_to(&self, args: &mut PgArguments) -> Result<(), BoxDynError> {
        match self {
            BindValue::Uuid(u) => args.add(*u),
            BindValue::Text(s) => args.add(s.clone()),
            BindValue::Decimal(d) => args.add(*d),
            BindValue::Timestamp(ts) => args.add(*ts),
            BindValue::BigInt(n) => args.add(*n),
        }
    }
}

/// Bind every parameter in order ($1, $2, ...).
pub fn to_arguments(params: &[BindValue]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for p in params {
        p.add_to(&mut args).map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
