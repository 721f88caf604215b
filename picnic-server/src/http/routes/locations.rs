//! Location endpoints
//!
//! Locations are addressed by id. `PUT /api/Locations/{id}` merges into the
//! stored record;
//! `PUT /api/Locations2/{id}` replaces it wholesale.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, PathId};
use crate::http::server::AppState;
use crate::models::{LocationPayload, PicnicLocation};
use crate::services;

/// GET /api/Locations - all locations
async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PicnicLocation>>, ApiError> {
    Ok(Json(services::list_locations(&state.pool).await?))
}

/// POST /api/Locations - create a location
async fn create_location(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LocationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let created = services::create_location(&state.pool, payload).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.body),
    ))
}

/// GET /api/Locations/{id} - a location by id
async fn get_location(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<Json<PicnicLocation>, ApiError> {
    Ok(Json(services::location_by_id(&state.pool, id).await?))
}

/// PUT /api/Locations/{id} - merge-update
async fn merge_location(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    ApiJson(payload): ApiJson<LocationPayload>,
) -> Result<StatusCode, ApiError> {
    services::merge_update(&state.pool, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/Locations2/{id} - replace-update
async fn replace_location(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    ApiJson(payload): ApiJson<LocationPayload>,
) -> Result<StatusCode, ApiError> {
    services::replace_update(&state.pool, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Location routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/Locations", get(list_locations).post(create_location))
        .route("/api/Locations/{id}", get(get_location).put(merge_location))
        .route("/api/Locations2/{id}", put(replace_location))
}
