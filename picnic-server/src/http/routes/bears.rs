//! Teddy bear endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{CreateTeddyBearRequest, TeddyBear};
use crate::services;

/// GET /api/TeddyBears - all bears
async fn list_bears(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeddyBear>>, ApiError> {
    Ok(Json(services::list_bears(&state.pool).await?))
}

/// POST /api/TeddyBears - create a bear
async fn create_bear(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTeddyBearRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = services::create_bear(&state.pool, req).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.body),
    ))
}

/// GET /api/TeddyBears/{name} - a bear by exact name
async fn get_bear(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TeddyBear>, ApiError> {
    Ok(Json(services::bear_by_name(&state.pool, &name).await?))
}

/// Teddy bear routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/TeddyBears", get(list_bears).post(create_bear))
        .route("/api/TeddyBears/{name}", get(get_bear))
}
