//! Campaign handlers: list, create, read, replace, partial update, delete.

use crate::error::AppError;
use crate::model::Campaign;
use crate::query::parse_list_params;
use crate::response::PageEnvelope;
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// Ids that are not UUIDs cannot name a record.
fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::NotFound(format!("campaign {}", id_str)))
}

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::MalformedRequest(rejection.body_text()))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::MalformedRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageEnvelope<Campaign>>, AppError> {
    let (query, page) = parse_list_params(&params, state.page_limits)?;
    let found = CrudService::list(state.store.as_ref(), &query, page).await?;
    tracing::debug!(
        count = found.count,
        page = page.page,
        ordering = %query.ordering,
        "campaigns listed"
    );
    Ok(Json(PageEnvelope::new(
        found.count,
        found.rows,
        page,
        uri.path(),
        uri.query(),
    )))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let draft = RequestValidator::validate_create(&body)?;
    let campaign = CrudService::create(state.store.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Campaign>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(CrudService::read(state.store.as_ref(), id).await?))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Campaign>, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    let patch = RequestValidator::validate_replace(&body)?;
    Ok(Json(CrudService::update(state.store.as_ref(), id, patch).await?))
}

pub async fn partial_update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Campaign>, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    let patch = RequestValidator::validate_partial(&body)?;
    Ok(Json(CrudService::update(state.store.as_ref(), id, patch).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    CrudService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
