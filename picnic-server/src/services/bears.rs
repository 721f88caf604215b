//! Teddy bear use-cases

use sqlx::SqlitePool;

use super::{Created, ServiceResult};
use crate::db::{BearRepo, DbError};
use crate::models::{CreateTeddyBearRequest, NewTeddyBear, TeddyBear};

/// Validate and store a new bear. Any id in the request is ignored.
pub async fn create_bear(
    pool: &SqlitePool,
    req: CreateTeddyBearRequest,
) -> ServiceResult<Created<TeddyBear>> {
    let bear = NewTeddyBear::try_from(req)?;
    let stored = BearRepo::new(pool).insert(bear).await?;

    tracing::info!(bear_id = stored.id, name = %stored.name, "teddy bear created");
    let (id, name) = (stored.id, stored.name.clone());
    Ok(Created::at("TeddyBears", id, &name, stored))
}

pub async fn list_bears(pool: &SqlitePool) -> ServiceResult<Vec<TeddyBear>> {
    Ok(BearRepo::new(pool).list().await?)
}

/// Bear with exactly this name, or not-found.
pub async fn bear_by_name(pool: &SqlitePool, name: &str) -> ServiceResult<TeddyBear> {
    BearRepo::new(pool)
        .find_by_name(name)
        .await?
        .ok_or_else(|| DbError::not_found("teddy bear", name).into())
}
