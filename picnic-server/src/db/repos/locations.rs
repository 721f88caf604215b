//! Location repository
//!
//! Two write paths with different existence semantics:
//! - update: in-place UPDATE of a row that must already exist
//! - upsert: INSERT .. ON CONFLICT(id) DO UPDATE, inserting when absent

use sqlx::{FromRow, SqlitePool};

use crate::models::{LocationFields, PicnicLocation};
use super::DbError;

/// Location record from database
#[derive(Debug, Clone, FromRow)]
struct LocationRow {
    id: i64,
    location_name: String,
    capacity: i32,
    municipality: String,
}

impl From<LocationRow> for PicnicLocation {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            location_name: row.location_name,
            capacity: row.capacity,
            municipality: row.municipality,
        }
    }
}

/// Location repository
pub struct LocationRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LocationRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all locations in id order.
    pub async fn list(&self) -> Result<Vec<PicnicLocation>, DbError> {
        let rows: Vec<LocationRow> = sqlx::query_as(
            "SELECT id, location_name, capacity, municipality FROM picnic_location ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PicnicLocation::from).collect())
    }

    /// Get a single location by id.
    pub async fn get(&self, id: i64) -> Result<PicnicLocation, DbError> {
        let row: LocationRow = sqlx::query_as(
            "SELECT id, location_name, capacity, municipality FROM picnic_location WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("location", id))?;

        Ok(row.into())
    }

    /// Find a location by its exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<PicnicLocation>, DbError> {
        let row: Option<LocationRow> = sqlx::query_as(
            "SELECT id, location_name, capacity, municipality FROM picnic_location WHERE location_name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(PicnicLocation::from))
    }

    /// Insert a new location with a generated id.
    pub async fn insert(&self, fields: LocationFields) -> Result<PicnicLocation, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO picnic_location (location_name, capacity, municipality)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(fields.location_name.as_str())
        .bind(fields.capacity)
        .bind(&fields.municipality)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::on_write("location", fields.location_name.as_str()))?;

        Ok(fields.into_location(id))
    }

    /// Persist the scalar fields of an existing row.
    ///
    /// Fails with [`DbError::NotFound`] if the row vanished in between.
    pub async fn update(&self, location: &PicnicLocation) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE picnic_location
            SET location_name = ?, capacity = ?, municipality = ?
            WHERE id = ?
            "#,
        )
        .bind(&location.location_name)
        .bind(location.capacity)
        .bind(&location.municipality)
        .bind(location.id)
        .execute(self.pool)
        .await
        .map_err(DbError::on_write("location", &location.location_name))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("location", location.id));
        }

        Ok(())
    }

    /// Write `location` wholesale under its id, inserting it if absent.
    pub async fn upsert(&self, location: &PicnicLocation) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO picnic_location (id, location_name, capacity, municipality)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                location_name = excluded.location_name,
                capacity = excluded.capacity,
                municipality = excluded.municipality
            "#,
        )
        .bind(location.id)
        .bind(&location.location_name)
        .bind(location.capacity)
        .bind(&location.municipality)
        .execute(self.pool)
        .await
        .map_err(DbError::on_write("location", &location.location_name))?;

        Ok(())
    }
}
