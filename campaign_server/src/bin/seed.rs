//! Replace all campaigns with sample data: `campaign-seed [COUNT]`.

use campaign_api::seed::{reseed, DEFAULT_SAMPLE_COUNT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = campaign_server::init()?;
    let count = match std::env::args().nth(1) {
        None => DEFAULT_SAMPLE_COUNT,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| format!("invalid COUNT '{}': {}", raw, e))?,
    };
    let store = campaign_server::open_store(&settings).await?;
    let created = reseed(store.as_ref(), count).await?;
    println!("Successfully created {} sample campaigns", created.len());
    Ok(())
}
