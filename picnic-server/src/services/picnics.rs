//! Picnic assembly and queries
//!
//! # Responsibility
//! - Resolve the names in a creation request to stored records
//! - Persist the picnic with its participants and return the projected view
//!
//! # Invariants
//! - An unknown location name leaves the picnic without a location
//! - Unknown bear names are dropped; the picnic keeps the ones that matched
//! - Name lookups are exact

use sqlx::SqlitePool;

use super::{Created, ServiceResult};
use crate::db::{BearRepo, DbError, LocationRepo, PicnicFilter, PicnicRepo};
use crate::models::{CreatePicnicRequest, NewPicnic, PicnicAggregate, PicnicDraft};
use crate::projection::{project_all, PicnicView};

/// Assemble and store a picnic from a creation request.
pub async fn create_picnic(
    pool: &SqlitePool,
    req: CreatePicnicRequest,
) -> ServiceResult<Created<PicnicView>> {
    let draft = PicnicDraft::try_from(req)?;

    let location = match draft.location_name.as_deref() {
        Some(name) => {
            let found = LocationRepo::new(pool).find_by_name(name).await?;
            if found.is_none() {
                tracing::warn!(
                    picnic = %draft.picnic_name,
                    location = name,
                    "location not found, picnic stored without a location"
                );
            }
            found
        }
        None => None,
    };

    let participants = BearRepo::new(pool).find_by_names(&draft.bear_names).await?;
    if participants.len() < draft.bear_names.len() {
        let dropped: Vec<&str> = draft
            .bear_names
            .iter()
            .map(String::as_str)
            .filter(|name| !participants.iter().any(|b| b.name == *name))
            .collect();
        tracing::debug!(picnic = %draft.picnic_name, ?dropped, "unknown teddy bears dropped");
    }

    let new_picnic = NewPicnic {
        picnic_name: draft.picnic_name,
        location_id: location.as_ref().map(|l| l.id),
        start_time: draft.start_time,
        has_music: draft.has_music,
        has_food: draft.has_food,
        participant_ids: participants.iter().map(|b| b.id).collect(),
    };
    let picnic = PicnicRepo::new(pool).insert(&new_picnic).await?;

    tracing::info!(
        picnic_id = picnic.id,
        name = %picnic.picnic_name,
        participants = participants.len(),
        "picnic created"
    );

    let (id, name) = (picnic.id, picnic.picnic_name.clone());
    let view = PicnicView::from(PicnicAggregate {
        picnic,
        location,
        participants,
    });
    Ok(Created::at("Picnics", id, &name, view))
}

pub async fn list_picnics(pool: &SqlitePool) -> ServiceResult<Vec<PicnicView>> {
    let aggregates = PicnicRepo::new(pool).list(&PicnicFilter::default()).await?;
    Ok(project_all(aggregates))
}

/// Picnic with exactly this name, or not-found.
pub async fn picnic_by_name(pool: &SqlitePool, name: &str) -> ServiceResult<PicnicView> {
    PicnicRepo::new(pool)
        .find_by_name(name)
        .await?
        .map(PicnicView::from)
        .ok_or_else(|| DbError::not_found("picnic", name).into())
}

/// Picnics held at the named location; not-found when there are none.
pub async fn picnics_at_location(pool: &SqlitePool, location_name: &str) -> ServiceResult<Vec<PicnicView>> {
    let aggregates = PicnicRepo::new(pool)
        .list(&PicnicFilter::at_location(location_name))
        .await?;

    if aggregates.is_empty() {
        return Err(DbError::not_found("picnics at location", location_name).into());
    }
    Ok(project_all(aggregates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;
    use crate::models::{CreateTeddyBearRequest, LocationPayload};
    use crate::services::{create_bear, create_location, ServiceError};

    async fn seed_bear(pool: &SqlitePool, name: &str) {
        let req: CreateTeddyBearRequest = serde_json::from_value(serde_json::json!({
            "name": name,
            "primaryColor": "brown",
            "ownerName": "Robin"
        }))
        .unwrap();
        create_bear(pool, req).await.unwrap();
    }

    async fn seed_location(pool: &SqlitePool, name: &str) {
        let payload = LocationPayload {
            id: None,
            location_name: name.into(),
            capacity: 25,
            municipality: "Ashdown".into(),
        };
        create_location(pool, payload).await.unwrap();
    }

    fn request(value: serde_json::Value) -> CreatePicnicRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn unknown_location_yields_null_location() {
        let pool = migrated_pool().await;

        let created = create_picnic(
            &pool,
            request(serde_json::json!({
                "picnicName": "Fair",
                "locationName": "Atlantis",
                "startTime": "2024-06-01T12:00:00"
            })),
        )
        .await
        .unwrap();

        assert_eq!(created.body.location, None);
        assert_eq!(picnic_by_name(&pool, "Fair").await.unwrap().location, None);
    }

    #[tokio::test]
    async fn unknown_bears_are_dropped() {
        let pool = migrated_pool().await;
        seed_bear(&pool, "Alice").await;

        let created = create_picnic(
            &pool,
            request(serde_json::json!({
                "picnicName": "Fair",
                "startTime": "2024-06-01T12:00:00",
                "teddyBears": ["Alice", "Ghost"]
            })),
        )
        .await
        .unwrap();

        assert_eq!(created.body.teddy_bears, vec!["Alice"]);
        assert_eq!(
            picnic_by_name(&pool, "Fair").await.unwrap().teddy_bears,
            vec!["Alice"]
        );
    }

    #[tokio::test]
    async fn round_trip_keeps_fields_and_defaults() {
        let pool = migrated_pool().await;
        seed_location(&pool, "Meadow").await;
        seed_bear(&pool, "Tigger").await;
        seed_bear(&pool, "Eeyore").await;

        let created = create_picnic(
            &pool,
            request(serde_json::json!({
                "picnicName": "Fair",
                "locationName": "Meadow",
                "startTime": "2024-06-01T12:30:00",
                "teddyBears": ["Tigger", "Eeyore", "Tigger"]
            })),
        )
        .await
        .unwrap();
        assert_eq!(created.location, "/api/Picnics/Fair");

        let fetched = picnic_by_name(&pool, "Fair").await.unwrap();
        assert_eq!(fetched, created.body);
        assert_eq!(fetched.picnic_name, "Fair");
        assert_eq!(
            fetched.start_time,
            crate::models::timestamp::parse("2024-06-01T12:30:00").unwrap()
        );
        assert!(fetched.has_music);
        assert!(fetched.has_food);
        assert_eq!(fetched.teddy_bears, vec!["Eeyore", "Tigger"]);
        assert_eq!(fetched.location.unwrap().location_name, "Meadow");
    }

    #[tokio::test]
    async fn duplicate_picnic_name_is_conflict() {
        let pool = migrated_pool().await;
        let body = serde_json::json!({"picnicName": "Fair", "startTime": "2024-06-01T12:00:00"});

        create_picnic(&pool, request(body.clone())).await.unwrap();
        let err = create_picnic(&pool, request(body)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Store(DbError::Conflict { .. })));
        assert_eq!(list_picnics(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_picnic_is_not_found() {
        let pool = migrated_pool().await;
        let err = picnic_by_name(&pool, "Nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn location_filter_not_found_when_empty() {
        let pool = migrated_pool().await;
        seed_location(&pool, "Meadow").await;
        seed_location(&pool, "Orchard").await;

        create_picnic(
            &pool,
            request(serde_json::json!({
                "picnicName": "Fair",
                "locationName": "Meadow",
                "startTime": "2024-06-01T12:00:00"
            })),
        )
        .await
        .unwrap();

        let at_meadow = picnics_at_location(&pool, "Meadow").await.unwrap();
        assert_eq!(at_meadow.len(), 1);

        let err = picnics_at_location(&pool, "Orchard").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(DbError::NotFound { .. })));
    }
}
