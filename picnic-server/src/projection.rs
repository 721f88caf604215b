//! Client-facing picnic view
//!
//! # Responsibility
//! - Flatten a [`PicnicAggregate`] into the shape returned by the picnic
//!   endpoints
//!
//! # Invariants
//! - Participants appear by name only, never as nested bear records
//! - The nested location is the scalar record; it has no picnic list, so the
//!   view is acyclic by construction

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{PicnicAggregate, PicnicLocation};

/// Serialized form of a picnic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PicnicView {
    pub id: i64,
    pub picnic_name: String,
    pub location: Option<PicnicLocation>,
    #[serde(serialize_with = "crate::models::timestamp::serialize")]
    pub start_time: NaiveDateTime,
    pub has_music: bool,
    pub has_food: bool,
    pub teddy_bears: Vec<String>,
}

impl From<PicnicAggregate> for PicnicView {
    fn from(agg: PicnicAggregate) -> Self {
        let PicnicAggregate {
            picnic,
            location,
            participants,
        } = agg;

        Self {
            id: picnic.id,
            picnic_name: picnic.picnic_name,
            location,
            start_time: picnic.start_time,
            has_music: picnic.has_music,
            has_food: picnic.has_food,
            teddy_bears: participants.into_iter().map(|b| b.name).collect(),
        }
    }
}

/// Project a batch of aggregates, keeping their order.
pub fn project_all(aggregates: Vec<PicnicAggregate>) -> Vec<PicnicView> {
    aggregates.into_iter().map(PicnicView::from).collect()
}
