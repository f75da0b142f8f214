//! Sample campaigns for local development.

use crate::error::AppError;
use crate::model::{Campaign, CampaignDraft, CampaignStatus, Money};
use crate::store::CampaignStore;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_SAMPLE_COUNT: usize = 10;

const PREFIXES: [&str; 10] = [
    "Summer",
    "Winter",
    "Spring",
    "Fall",
    "Holiday",
    "Black Friday",
    "Cyber Monday",
    "Back to School",
    "New Year",
    "Valentine's Day",
];

const SUFFIXES: [&str; 10] = [
    "Sale",
    "Promotion",
    "Campaign",
    "Special",
    "Discount",
    "Event",
    "Launch",
    "Offer",
    "Deal",
    "Giveaway",
];

/// Weighted so active campaigns dominate.
const STATUSES: [CampaignStatus; 6] = [
    CampaignStatus::Active,
    CampaignStatus::Active,
    CampaignStatus::Active,
    CampaignStatus::Paused,
    CampaignStatus::Paused,
    CampaignStatus::Completed,
];

const MAX_DAYS_AGO: i64 = 30;

fn whole(units: i64) -> Result<Money, AppError> {
    Money::from_cents(units * 100).map_err(|e| AppError::Store(format!("sample amount {}: {}", units, e)))
}

/// `count` campaigns numbered from 1, created up to 30 days before `now`.
pub fn generate_sample<R: Rng>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<Campaign>, AppError> {
    let mut samples = Vec::with_capacity(count);
    for n in 1..=count {
        let prefix = PREFIXES.choose(rng).copied().unwrap_or(PREFIXES[0]);
        let suffix = SUFFIXES.choose(rng).copied().unwrap_or(SUFFIXES[0]);
        let budget: i64 = rng.gen_range(1000..=10_000);
        let spend = rng.gen_range(0..=budget);
        let status = STATUSES.choose(rng).copied().unwrap_or_default();
        let created_at = now - Duration::days(rng.gen_range(0..=MAX_DAYS_AGO));
        samples.push(Campaign::create(
            CampaignDraft {
                name: format!("{} {} {}", prefix, suffix, n),
                budget: whole(budget)?,
                spend: whole(spend)?,
                status,
            },
            created_at,
        ));
    }
    Ok(samples)
}

/// Delete every campaign, then insert `count` fresh samples. Returns the inserted rows.
pub async fn reseed(store: &dyn CampaignStore, count: usize) -> Result<Vec<Campaign>, AppError> {
    let removed = store.clear().await?;
    tracing::info!(removed, "cleared campaigns");

    let samples = generate_sample(&mut rand::thread_rng(), count, Utc::now())?;
    let mut inserted = Vec::with_capacity(samples.len());
    for campaign in &samples {
        let stored = store.insert(campaign).await?;
        tracing::debug!(id = %stored.id, name = %stored.name, status = %stored.status, "sample campaign");
        inserted.push(stored);
    }
    tracing::info!(count = inserted.len(), "sample campaigns created");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCampaignStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;

    #[test]
    fn samples_respect_ranges() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate_sample(&mut rng, 200, now).unwrap();
        assert_eq!(samples.len(), 200);
        for (i, c) in samples.iter().enumerate() {
            assert!(c.name.ends_with(&format!(" {}", i + 1)), "{}", c.name);
            assert!(PREFIXES.iter().any(|p| c.name.starts_with(p)));
            assert!(c.budget.get() >= Decimal::from(1000) && c.budget.get() <= Decimal::from(10_000));
            assert!(c.spend.get() <= c.budget.get());
            assert!(c.created_at <= now);
            assert!(now - c.created_at <= Duration::days(MAX_DAYS_AGO) + Duration::seconds(1));
            assert_eq!(c.created_at, c.updated_at);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_sample(&mut rng, 0, Utc::now()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn reseed_replaces_existing_rows() {
        let store = MemoryCampaignStore::new();
        reseed(&store, 5).await.unwrap();
        let inserted = reseed(&store, 3).await.unwrap();
        assert_eq!(inserted.len(), 3);
        assert_eq!(store.clear().await.unwrap(), 3);
    }
}
