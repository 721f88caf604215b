//! Picnic locations

use serde::{Deserialize, Serialize};

use super::name::LocationName;
use super::validation::{required_text, ValidationError};

const MAX_MUNICIPALITY_LEN: usize = 50;

/// Capacity used when a payload leaves it out
pub const DEFAULT_CAPACITY: i32 = 25;

fn default_capacity() -> i32 {
    DEFAULT_CAPACITY
}

/// Stored picnic location.
///
/// Carries no collection of picnics: the picnic side owns the reference,
/// so serializing a location can never walk back into its picnics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicnicLocation {
    pub id: i64,
    pub location_name: String,
    pub capacity: i32,
    pub municipality: String,
}

/// Location body for `POST /api/Locations` and both PUT endpoints.
///
/// `id` is only meaningful for the updates, where it must equal the URL id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub location_name: String,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    pub municipality: String,
}

/// Validated mutable fields of a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFields {
    pub location_name: LocationName,
    pub capacity: i32,
    pub municipality: String,
}

impl LocationPayload {
    /// Check that the body addresses the same record as the URL.
    ///
    /// A body without an id never matches.
    pub fn ensure_id(&self, path_id: i64) -> Result<(), ValidationError> {
        match self.id {
            Some(id) if id == path_id => Ok(()),
            other => Err(ValidationError::IdMismatch {
                path: path_id,
                body: other.unwrap_or_default(),
            }),
        }
    }

    /// Validate the mutable fields.
    pub fn fields(&self) -> Result<LocationFields, ValidationError> {
        if self.capacity < 0 {
            return Err(ValidationError::Negative { field: "capacity" });
        }

        Ok(LocationFields {
            location_name: LocationName::new(&self.location_name)?,
            capacity: self.capacity,
            municipality: required_text("municipality", &self.municipality, MAX_MUNICIPALITY_LEN)?,
        })
    }
}

impl LocationFields {
    /// Build a whole record for `id` from these fields.
    pub fn into_location(self, id: i64) -> PicnicLocation {
        PicnicLocation {
            id,
            location_name: self.location_name.into_string(),
            capacity: self.capacity,
            municipality: self.municipality,
        }
    }

    /// Overwrite the mutable fields of `location`, keeping its id.
    pub fn apply_to(self, location: &mut PicnicLocation) {
        location.location_name = self.location_name.into_string();
        location.capacity = self.capacity;
        location.municipality = self.municipality;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> LocationPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn capacity_defaults_to_25() {
        let p = payload(r#"{"locationName": "Meadow", "municipality": "Ashdown"}"#);
        assert_eq!(p.capacity, 25);
    }

    #[test]
    fn ensure_id_matches() {
        let p = payload(r#"{"id": 3, "locationName": "Meadow", "municipality": "Ashdown"}"#);
        assert!(p.ensure_id(3).is_ok());
        assert_eq!(
            p.ensure_id(4).unwrap_err(),
            ValidationError::IdMismatch { path: 4, body: 3 }
        );
    }

    #[test]
    fn missing_body_id_is_a_mismatch() {
        let p = payload(r#"{"locationName": "Meadow", "municipality": "Ashdown"}"#);
        assert!(matches!(
            p.ensure_id(1).unwrap_err(),
            ValidationError::IdMismatch { path: 1, body: 0 }
        ));
    }

    #[test]
    fn rejects_negative_capacity() {
        let p = payload(r#"{"locationName": "Meadow", "capacity": -1, "municipality": "Ashdown"}"#);
        assert_eq!(
            p.fields().unwrap_err(),
            ValidationError::Negative { field: "capacity" }
        );
    }

    #[test]
    fn apply_to_keeps_id() {
        let mut existing = PicnicLocation {
            id: 9,
            location_name: "Old".into(),
            capacity: 10,
            municipality: "Town".into(),
        };
        let p = payload(r#"{"id": 9, "locationName": "New", "capacity": 40, "municipality": "City"}"#);
        p.fields().unwrap().apply_to(&mut existing);

        assert_eq!(existing.id, 9);
        assert_eq!(existing.location_name, "New");
        assert_eq!(existing.capacity, 40);
        assert_eq!(existing.municipality, "City");
    }
}
