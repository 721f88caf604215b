//! Picnic repository
//!
//! Reads load the whole aggregate in two queries regardless of result size:
//! one LEFT JOIN for picnics with their location, one `IN (...)` for all
//! participants of those picnics.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::models::{NewPicnic, Picnic, PicnicAggregate, PicnicLocation, TeddyBear};
use super::bears::TeddyBearRow;
use super::DbError;

/// Picnic joined with its optional location
#[derive(Debug, Clone, FromRow)]
struct PicnicRow {
    id: i64,
    picnic_name: String,
    location_id: Option<i64>,
    start_time: NaiveDateTime,
    has_music: Option<bool>,
    has_food: Option<bool>,
    location_name: Option<String>,
    capacity: Option<i32>,
    municipality: Option<String>,
}

impl PicnicRow {
    fn into_parts(self) -> (Picnic, Option<PicnicLocation>) {
        let location = match (self.location_id, self.location_name, self.municipality) {
            (Some(id), Some(location_name), Some(municipality)) => Some(PicnicLocation {
                id,
                location_name,
                capacity: self.capacity.unwrap_or_default(),
                municipality,
            }),
            _ => None,
        };

        let picnic = Picnic {
            id: self.id,
            picnic_name: self.picnic_name,
            location_id: self.location_id,
            start_time: self.start_time,
            // unknown flags read as false
            has_music: self.has_music.unwrap_or(false),
            has_food: self.has_food.unwrap_or(false),
        };

        (picnic, location)
    }
}

#[derive(Debug, Clone, FromRow)]
struct ParticipantRow {
    picnic_id: i64,
    #[sqlx(flatten)]
    bear: TeddyBearRow,
}

/// Optional equality filters for [`PicnicRepo::list`]; all set fields must match.
#[derive(Debug, Clone, Default)]
pub struct PicnicFilter {
    pub id: Option<i64>,
    pub picnic_name: Option<String>,
    pub location_name: Option<String>,
}

impl PicnicFilter {
    pub fn by_name(name: &str) -> Self {
        Self {
            picnic_name: Some(name.to_owned()),
            ..Self::default()
        }
    }

    pub fn at_location(location_name: &str) -> Self {
        Self {
            location_name: Some(location_name.to_owned()),
            ..Self::default()
        }
    }
}

/// Picnic repository
pub struct PicnicRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PicnicRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a picnic and its participant rows in one transaction.
    ///
    /// A taken name yields [`DbError::Conflict`]; a location or bear id that
    /// does not exist yields [`DbError::MissingReference`]. Either way nothing
    /// is written.
    pub async fn insert(&self, picnic: &NewPicnic) -> Result<Picnic, DbError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO picnic (picnic_name, location_id, start_time, has_music, has_food)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(picnic.picnic_name.as_str())
        .bind(picnic.location_id)
        .bind(picnic.start_time)
        .bind(picnic.has_music)
        .bind(picnic.has_food)
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::on_write("picnic", picnic.picnic_name.as_str()))?;

        for bear_id in &picnic.participant_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO picnic_participant (picnic_id, teddy_bear_id) VALUES (?, ?)",
            )
            .bind(id)
            .bind(bear_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            picnic_id = id,
            participants = picnic.participant_ids.len(),
            "picnic stored"
        );

        Ok(Picnic {
            id,
            picnic_name: picnic.picnic_name.as_str().to_owned(),
            location_id: picnic.location_id,
            start_time: picnic.start_time,
            has_music: picnic.has_music,
            has_food: picnic.has_food,
        })
    }

    /// List picnics matching `filter`, in id order, with location and
    /// participants (participants ordered by name).
    pub async fn list(&self, filter: &PicnicFilter) -> Result<Vec<PicnicAggregate>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT p.id, p.picnic_name, p.location_id, p.start_time, p.has_music, p.has_food,
                   l.location_name, l.capacity, l.municipality
            FROM picnic p
            LEFT JOIN picnic_location l ON l.id = p.location_id
            WHERE 1 = 1
            "#,
        );
        if let Some(id) = filter.id {
            query.push(" AND p.id = ").push_bind(id);
        }
        if let Some(name) = &filter.picnic_name {
            query.push(" AND p.picnic_name = ").push_bind(name.as_str());
        }
        if let Some(location_name) = &filter.location_name {
            query.push(" AND l.location_name = ").push_bind(location_name.as_str());
        }
        query.push(" ORDER BY p.id");

        let rows: Vec<PicnicRow> = query.build_query_as().fetch_all(self.pool).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut participants = self.participants_of(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let participants = participants.remove(&row.id).unwrap_or_default();
                let (picnic, location) = row.into_parts();
                PicnicAggregate {
                    picnic,
                    location,
                    participants,
                }
            })
            .collect())
    }

    /// Get a single picnic aggregate by id.
    pub async fn get(&self, id: i64) -> Result<PicnicAggregate, DbError> {
        let filter = PicnicFilter {
            id: Some(id),
            ..PicnicFilter::default()
        };

        self.list(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("picnic", id))
    }

    /// Find a picnic aggregate by its exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<PicnicAggregate>, DbError> {
        Ok(self.list(&PicnicFilter::by_name(name)).await?.into_iter().next())
    }

    async fn participants_of(&self, picnic_ids: &[i64]) -> Result<HashMap<i64, Vec<TeddyBear>>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT pp.picnic_id, b.id, b.name, b.primary_color, b.accent_color,
                   b.is_dressed, b.owner_name, b.characteristic
            FROM picnic_participant pp
            JOIN teddy_bear b ON b.id = pp.teddy_bear_id
            WHERE pp.picnic_id IN (
            "#,
        );
        let mut separated = query.separated(", ");
        for id in picnic_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY b.name");

        let rows: Vec<ParticipantRow> = query.build_query_as().fetch_all(self.pool).await?;

        let mut by_picnic: HashMap<i64, Vec<TeddyBear>> = HashMap::new();
        for row in rows {
            by_picnic
                .entry(row.picnic_id)
                .or_default()
                .push(row.bear.into());
        }
        Ok(by_picnic)
    }
}
