//! picnic-server: teddy bear picnic planning API
//!
//! Layers, leaves first:
//! - [`models`]: records and request payloads, validated at construction
//! - [`db`]: SQLite pool, schema and repositories
//! - [`projection`]: acyclic client view of a picnic
//! - [`services`]: picnic assembly and location/bear mutations
//! - [`http`]: axum routes and server

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod projection;
pub mod services;
pub mod swagger;

pub use config::PicnicConfig;
pub use http::{run_server, AppState, ServerConfig};
