//! API description endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ValidationError;
use crate::swagger::openapi_document;

/// GET /swagger/v1/swagger.json - OpenAPI description of this service
async fn swagger_json() -> Json<Value> {
    Json(openapi_document())
}

/// GET /api/SwaggerDefinition - fetch the description back from the
/// requesting host and return it verbatim
async fn swagger_definition(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())
        .ok_or(ApiError::Validation(ValidationError::Empty { field: "Host" }))?;

    let body = state.swagger.fetch(host).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Swagger routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/swagger/v1/swagger.json", get(swagger_json))
        .route("/api/SwaggerDefinition", get(swagger_definition))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio::net::TcpListener;

    use crate::http::routes::test_support::{app, get, send};
    use crate::swagger::openapi_document;

    #[tokio::test]
    async fn serves_static_document() {
        let (app, _pool) = app().await;
        let response = send(&app, get("/swagger/v1/swagger.json")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, openapi_document());
    }

    #[tokio::test]
    async fn definition_is_fetched_from_request_host() {
        let (app, _pool) = app().await;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let served = app.clone();
        tokio::spawn(async move {
            axum::serve(listener, served).await.unwrap();
        });

        let request = Request::get("/api/SwaggerDefinition")
            .header("host", addr.to_string())
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, openapi_document());
    }

    #[tokio::test]
    async fn unreachable_host_is_502() {
        let (app, _pool) = app().await;

        // bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let request = Request::get("/api/SwaggerDefinition")
            .header("host", format!("127.0.0.1:{port}"))
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.body["error"], "upstream_error");
    }

    #[tokio::test]
    async fn missing_host_is_400() {
        let (app, _pool) = app().await;
        let response = send(&app, get("/api/SwaggerDefinition")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
