use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{ConeSearchQuery, MatchQuery};
use crate::response_types::{ConeSearchResponse, MatchResponse, StatsResponse};

pub async fn match_name(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchResponse>, ApiError> {
    let matches = state.target_service.match_name(&query.name, query.exact).await?;
    Ok(Json(MatchResponse {
        manager: state.target_service.matcher().kind().to_owned(),
        query: query.name,
        exact: query.exact,
        matches,
    }))
}

pub async fn cone_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConeSearchQuery>,
) -> Result<Json<ConeSearchResponse>, ApiError> {
    let (ra, dec) = query.degrees()?;
    let matches = state.target_service.cone_search(ra, dec, query.radius).await?;
    Ok(Json(ConeSearchResponse { ra, dec, radius_arcsec: query.radius, matches }))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(StatsResponse {
        match_manager: state.target_service.matcher().kind().to_owned(),
        stats: state.target_service.stats().await?,
    }))
}
