//! Router assembly: campaign routes under `/api`, probes at the root, plus CORS, tracing and a body limit.

pub mod campaign;
pub mod common;

pub use campaign::campaign_routes;
pub use common::common_routes;

use crate::config::Settings;
use crate::error::ConfigError;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api";

pub fn app(state: AppState, settings: &Settings) -> Result<Router, ConfigError> {
    Ok(Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, campaign_routes(state))
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(cors_layer(&settings.cors_allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Any origin when `origins` is empty, otherwise exactly those origins.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|e| ConfigError::Invalid {
                    name: "CORS_ALLOWED_ORIGINS",
                    reason: format!("'{}': {}", o, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any))
}
