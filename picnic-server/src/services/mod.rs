//! Use-case services over the entity store
//!
//! # Responsibility
//! - Turn validated requests into store calls and shape the results
//! - Take the pool as an explicit argument; hold no state of their own
//!
//! # Invariants
//! - Validation failures are raised before the store is touched
//! - Store error kinds pass through unmerged

pub mod bears;
pub mod locations;
pub mod picnics;

use crate::db::DbError;
use crate::models::ValidationError;

pub use bears::{bear_by_name, create_bear, list_bears};
pub use locations::{
    create_location, list_locations, location_by_id, merge_update, replace_update,
};
pub use picnics::{create_picnic, list_picnics, picnic_by_name, picnics_at_location};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A newly stored record and the path its GET route answers on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<T> {
    pub id: i64,
    pub location: String,
    pub body: T,
}

impl<T> Created<T> {
    /// `key` is whatever the collection's GET route looks records up by.
    pub(crate) fn at(collection: &str, id: i64, key: &str, body: T) -> Self {
        Self {
            id,
            location: format!("/api/{collection}/{}", urlencoding::encode(key)),
            body,
        }
    }
}
