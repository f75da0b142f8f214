//! Campaign API server.
//!
//! Run from repo root: `cargo run -p campaign-server --bin campaign-server`

use campaign_api::{app, AppState, API_PREFIX};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = campaign_server::init()?;
    let store = campaign_server::open_store(&settings).await?;
    let state = AppState::new(store, &settings);
    let router = app(state, &settings)?;

    let listener = TcpListener::bind(settings.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(
        backend = ?settings.store_backend,
        page_size = settings.page_size,
        "campaign API listening on http://{}{}/campaigns/",
        addr,
        API_PREFIX
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
