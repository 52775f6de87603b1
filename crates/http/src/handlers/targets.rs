use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tom_catalog_core::{NewTarget, Target, TargetId, TargetName, TargetUpdate};
use tom_catalog_storage::PaginatedResult;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{AliasRequest, ListQuery};

pub async fn list_targets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PaginatedResult<Target>>, ApiError> {
    Ok(Json(state.target_service.list(query.offset, query.limit).await?))
}

pub async fn create_target(
    State(state): State<Arc<AppState>>,
    Json(target): Json<NewTarget>,
) -> Result<(StatusCode, Json<Target>), ApiError> {
    let saved = state.target_service.create(target).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn get_target(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Target>, ApiError> {
    Ok(Json(state.target_service.get(TargetId(id)).await?))
}

pub async fn update_target(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<TargetUpdate>,
) -> Result<Json<Target>, ApiError> {
    Ok(Json(state.target_service.update(TargetId(id), update).await?))
}

pub async fn delete_target(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.target_service.delete(TargetId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_alias(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<AliasRequest>,
) -> Result<(StatusCode, Json<TargetName>), ApiError> {
    let alias = state.target_service.add_alias(TargetId(id), &req.name).await?;
    Ok((StatusCode::CREATED, Json(alias)))
}

pub async fn delete_alias(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.target_service.remove_alias(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
