//! Location use-cases
//!
//! # Invariants
//! - `merge_update` and `replace_update` stay separate operations: the first
//!   loads the record and fails when it is absent, the second writes the
//!   payload under the given id without looking first
//! - Both check the path id against the body id before any store access

use sqlx::SqlitePool;

use super::{Created, ServiceResult};
use crate::db::LocationRepo;
use crate::models::{LocationPayload, PicnicLocation};

pub async fn list_locations(pool: &SqlitePool) -> ServiceResult<Vec<PicnicLocation>> {
    Ok(LocationRepo::new(pool).list().await?)
}

/// Validate and store a new location. Any id in the payload is ignored.
pub async fn create_location(
    pool: &SqlitePool,
    payload: LocationPayload,
) -> ServiceResult<Created<PicnicLocation>> {
    let fields = payload.fields()?;
    let stored = LocationRepo::new(pool).insert(fields).await?;

    tracing::info!(location_id = stored.id, name = %stored.location_name, "location created");
    let id = stored.id;
    Ok(Created::at("Locations", id, &id.to_string(), stored))
}

pub async fn location_by_id(pool: &SqlitePool, id: i64) -> ServiceResult<PicnicLocation> {
    Ok(LocationRepo::new(pool).get(id).await?)
}

/// Load location `id`, overwrite its mutable fields from `payload`, persist.
///
/// Picnics referencing the location keep pointing at it.
pub async fn merge_update(pool: &SqlitePool, id: i64, payload: LocationPayload) -> ServiceResult<()> {
    payload.ensure_id(id)?;
    let fields = payload.fields()?;

    let repo = LocationRepo::new(pool);
    let mut location = repo.get(id).await?;
    fields.apply_to(&mut location);
    repo.update(&location).await?;

    tracing::info!(location_id = id, "location merged");
    Ok(())
}

/// Write a fresh record built from `payload` under `id`, inserting it when
/// no location has that id yet.
pub async fn replace_update(pool: &SqlitePool, id: i64, payload: LocationPayload) -> ServiceResult<()> {
    payload.ensure_id(id)?;
    let location = payload.fields()?.into_location(id);

    LocationRepo::new(pool).upsert(&location).await?;

    tracing::info!(location_id = id, "location replaced");
    Ok(())
}
