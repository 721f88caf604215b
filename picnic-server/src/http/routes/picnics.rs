//! Picnic endpoints

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
use crate::models::CreatePicnicRequest;
use crate::projection::PicnicView;
use crate::services;

/// GET /api/Picnics - all picnics
async fn list_picnics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PicnicView>>, ApiError> {
    Ok(Json(services::list_picnics(&state.pool).await?))
}

/// POST /api/Picnics - assemble a picnic from names
async fn create_picnic(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePicnicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = services::create_picnic(&state.pool, req).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.body),
    ))
}

/// GET /api/Picnics/{name} - a picnic by exact name
async fn get_picnic(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<PicnicView>, ApiError> {
    Ok(Json(services::picnic_by_name(&state.pool, &name).await?))
}

/// GET /api/Picnics/Locations/{location_name} - picnics at a location
async fn picnics_at_location(
    State(state): State<Arc<AppState>>,
    Path(location_name): Path<String>,
) -> Result<Json<Vec<PicnicView>>, ApiError> {
    Ok(Json(
        services::picnics_at_location(&state.pool, &location_name).await?,
    ))
}

/// Picnic routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/Picnics", get(list_picnics).post(create_picnic))
        .route("/api/Picnics/{name}", get(get_picnic))
        .route("/api/Picnics/Locations/{location_name}", get(picnics_at_location))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::http::routes::test_support::{app, get, json, send};

    async fn seed(app: &axum::Router) {
        let bear = json!({"name": "Alice", "primaryColor": "brown", "ownerName": "Robin"});
        assert_eq!(
            send(app, json("POST", "/api/TeddyBears", bear)).await.status,
            StatusCode::CREATED
        );
        let location = json!({"locationName": "Meadow", "municipality": "Ashdown"});
        assert_eq!(
            send(app, json("POST", "/api/Locations", location)).await.status,
            StatusCode::CREATED
        );
    }

    #[tokio::test]
    async fn create_then_fetch_by_name() {
        let (app, _pool) = app().await;
        seed(&app).await;

        let created = send(
            &app,
            json(
                "POST",
                "/api/Picnics",
                json!({
                    "picnicName": "Summer Fair",
                    "locationName": "Meadow",
                    "startTime": "2024-06-01T12:00:00",
                    "hasMusic": false,
                    "teddyBears": ["Alice", "Ghost"]
                }),
            ),
        )
        .await;

        assert_eq!(created.status, StatusCode::CREATED);
        let location = created.headers.get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/api/Picnics/Summer%20Fair");
        assert_eq!(created.body["teddyBears"], json!(["Alice"]));

        let fetched = send(&app, get(location)).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, created.body);
        assert_eq!(fetched.body["picnicName"], "Summer Fair");
        assert_eq!(fetched.body["startTime"], "2024-06-01T12:00:00");
        assert_eq!(fetched.body["hasMusic"], false);
        assert_eq!(fetched.body["hasFood"], true);
        assert_eq!(fetched.body["location"]["locationName"], "Meadow");
    }

    #[tokio::test]
    async fn location_header_ignores_numeric_names() {
        let (app, _pool) = app().await;
        let at = |name: &str| {
            json(
                "POST",
                "/api/Picnics",
                json!({"picnicName": name, "startTime": "2024-06-01T12:00:00"}),
            )
        };

        let first = send(&app, at("Fair")).await;
        let numeric = send(&app, at("1")).await;
        assert_eq!(numeric.status, StatusCode::CREATED);

        let location = first.headers.get("location").unwrap().to_str().unwrap();
        let fetched = send(&app, get(location)).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, first.body);
        assert_ne!(fetched.body, numeric.body);
    }

    #[tokio::test]
    async fn participants_are_names_only() {
        let (app, _pool) = app().await;
        seed(&app).await;

        send(
            &app,
            json(
                "POST",
                "/api/Picnics",
                json!({"picnicName": "Fair", "startTime": "2024-06-01T12:00:00", "teddyBears": ["Alice"]}),
            ),
        )
        .await;

        let list = send(&app, get("/api/Picnics")).await;
        assert_eq!(list.status, StatusCode::OK);
        let picnics = list.body.as_array().unwrap();
        assert_eq!(picnics.len(), 1);
        assert!(picnics[0]["teddyBears"][0].is_string());
    }

    #[tokio::test]
    async fn unknown_picnic_is_404() {
        let (app, _pool) = app().await;
        let response = send(&app, get("/api/Picnics/Nope")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"], "not_found");
    }

    #[tokio::test]
    async fn location_filter_404_when_empty() {
        let (app, _pool) = app().await;
        seed(&app).await;

        let response = send(&app, get("/api/Picnics/Locations/Meadow")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        send(
            &app,
            json(
                "POST",
                "/api/Picnics",
                json!({"picnicName": "Fair", "locationName": "Meadow", "startTime": "2024-06-01T12:00:00"}),
            ),
        )
        .await;

        let response = send(&app, get("/api/Picnics/Locations/Meadow")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_name_is_409() {
        let (app, _pool) = app().await;
        let body = json!({"picnicName": "Fair", "startTime": "2024-06-01T12:00:00"});

        send(&app, json("POST", "/api/Picnics", body.clone())).await;
        let response = send(&app, json("POST", "/api/Picnics", body)).await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.body["error"], "conflict");
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let (app, _pool) = app().await;
        let response = send(
            &app,
            json("POST", "/api/Picnics", json!({"picnicName": "Fair", "startTime": "whenever"})),
        )
        .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "validation_error");
    }
}
