//! API description: the static OpenAPI document and the client that fetches
//! it back from a host.

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::SwaggerConfig;

/// Swagger client error type
#[derive(Debug, thiserror::Error)]
pub enum SwaggerError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches `{scheme}://{host}{path}`
#[derive(Debug, Clone)]
pub struct SwaggerClient {
    http: reqwest::Client,
    scheme: String,
    path: String,
}

impl SwaggerClient {
    pub fn new(config: &SwaggerConfig) -> Result<Self, SwaggerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(SwaggerError::Client)?;

        Ok(Self {
            http,
            scheme: config.scheme.clone(),
            path: config.path.clone(),
        })
    }

    /// URL of the description served by `host` (`name` or `name:port`).
    pub fn definition_url(&self, host: &str) -> String {
        format!("{}://{}{}", self.scheme, host, self.path)
    }

    /// Fetch the description from `host`; non-2xx answers are errors.
    pub async fn fetch(&self, host: &str) -> Result<String, SwaggerError> {
        let url = self.definition_url(host);
        tracing::debug!(%url, "fetching swagger definition");

        let wrap = |source| SwaggerError::Request {
            url: url.clone(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?;

        response.text().await.map_err(wrap)
    }
}

fn location_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "format": "int64"},
            "locationName": {"type": "string", "maxLength": 50},
            "capacity": {"type": "integer", "format": "int32", "default": 25},
            "municipality": {"type": "string", "maxLength": 50}
        }
    })
}

fn bear_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "format": "int64"},
            "name": {"type": "string", "maxLength": 50},
            "primaryColor": {"type": "string", "maxLength": 20},
            "accentColor": {"type": "string", "maxLength": 20, "nullable": true},
            "isDressed": {"type": "boolean", "default": true},
            "ownerName": {"type": "string", "maxLength": 50},
            "characteristic": {"type": "string", "maxLength": 50, "nullable": true}
        }
    })
}

fn picnic_view_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "format": "int64"},
            "picnicName": {"type": "string"},
            "location": {"$ref": "#/components/schemas/PicnicLocation", "nullable": true},
            "startTime": {"type": "string", "format": "date-time"},
            "hasMusic": {"type": "boolean"},
            "hasFood": {"type": "boolean"},
            "teddyBears": {"type": "array", "items": {"type": "string"}}
        }
    })
}

fn create_picnic_schema() -> Value {
    json!({
        "type": "object",
        "required": ["picnicName", "startTime"],
        "properties": {
            "picnicName": {"type": "string", "maxLength": 50},
            "locationName": {"type": "string", "nullable": true},
            "startTime": {"type": "string", "format": "date-time"},
            "hasMusic": {"type": "boolean", "default": true},
            "hasFood": {"type": "boolean", "default": true},
            "teddyBears": {"type": "array", "items": {"type": "string"}}
        }
    })
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": schema}}
    })
}

fn schema_ref(schema: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{schema}")})
}

fn array_of(schema: &str) -> Value {
    json!({"type": "array", "items": schema_ref(schema)})
}

fn path_param(name: &str, kind: &str) -> Value {
    json!({"name": name, "in": "path", "required": true, "schema": {"type": kind}})
}

/// OpenAPI 3 description of the HTTP surface.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.1",
        "info": {
            "title": "Picnic API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/api/Picnics": {
                "get": {
                    "tags": ["Picnics"],
                    "responses": {"200": json_response("Success", array_of("PicnicView"))}
                },
                "post": {
                    "tags": ["Picnics"],
                    "requestBody": json_body("CreatePicnic"),
                    "responses": {
                        "201": json_response("Created", schema_ref("PicnicView")),
                        "400": {"description": "Bad Request"},
                        "409": {"description": "Conflict"}
                    }
                }
            },
            "/api/Picnics/{name}": {
                "get": {
                    "tags": ["Picnics"],
                    "parameters": [path_param("name", "string")],
                    "responses": {
                        "200": json_response("Success", schema_ref("PicnicView")),
                        "404": {"description": "Not Found"}
                    }
                }
            },
            "/api/Picnics/Locations/{locationName}": {
                "get": {
                    "tags": ["Picnics"],
                    "parameters": [path_param("locationName", "string")],
                    "responses": {
                        "200": json_response("Success", array_of("PicnicView")),
                        "404": {"description": "Not Found"}
                    }
                }
            },
            "/api/Locations": {
                "get": {
                    "tags": ["Locations"],
                    "responses": {"200": json_response("Success", array_of("PicnicLocation"))}
                },
                "post": {
                    "tags": ["Locations"],
                    "requestBody": json_body("PicnicLocation"),
                    "responses": {
                        "201": json_response("Created", schema_ref("PicnicLocation")),
                        "400": {"description": "Bad Request"},
                        "409": {"description": "Conflict"}
                    }
                }
            },
            "/api/Locations/{id}": {
                "get": {
                    "tags": ["Locations"],
                    "parameters": [path_param("id", "integer")],
                    "responses": {
                        "200": json_response("Success", schema_ref("PicnicLocation")),
                        "404": {"description": "Not Found"}
                    }
                },
                "put": {
                    "tags": ["Locations"],
                    "parameters": [path_param("id", "integer")],
                    "requestBody": json_body("PicnicLocation"),
                    "responses": {
                        "204": {"description": "No Content"},
                        "400": {"description": "Bad Request"},
                        "404": {"description": "Not Found"}
                    }
                }
            },
            "/api/Locations2/{id}": {
                "put": {
                    "tags": ["Locations"],
                    "parameters": [path_param("id", "integer")],
                    "requestBody": json_body("PicnicLocation"),
                    "responses": {
                        "204": {"description": "No Content"},
                        "400": {"description": "Bad Request"}
                    }
                }
            },
            "/api/TeddyBears": {
                "get": {
                    "tags": ["TeddyBears"],
                    "responses": {"200": json_response("Success", array_of("TeddyBear"))}
                },
                "post": {
                    "tags": ["TeddyBears"],
                    "requestBody": json_body("TeddyBear"),
                    "responses": {
                        "201": json_response("Created", schema_ref("TeddyBear")),
                        "400": {"description": "Bad Request"},
                        "409": {"description": "Conflict"}
                    }
                }
            },
            "/api/TeddyBears/{name}": {
                "get": {
                    "tags": ["TeddyBears"],
                    "parameters": [path_param("name", "string")],
                    "responses": {
                        "200": json_response("Success", schema_ref("TeddyBear")),
                        "404": {"description": "Not Found"}
                    }
                }
            },
            "/api/SwaggerDefinition": {
                "get": {
                    "tags": ["Services"],
                    "responses": {"200": {"description": "Success"}}
                }
            }
        },
        "components": {
            "schemas": {
                "PicnicLocation": location_schema(),
                "TeddyBear": bear_schema(),
                "PicnicView": picnic_view_schema(),
                "CreatePicnic": create_picnic_schema()
            }
        }
    })
}
