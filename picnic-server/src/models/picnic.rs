//! Picnics and their creation payload

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::bear::TeddyBear;
use super::location::PicnicLocation;
use super::name::PicnicName;
use super::ValidationError;

fn default_true() -> bool {
    true
}

/// Stored picnic row with its foreign key, not its related records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picnic {
    pub id: i64,
    pub picnic_name: String,
    pub location_id: Option<i64>,
    pub start_time: NaiveDateTime,
    pub has_music: bool,
    pub has_food: bool,
}

/// A picnic together with its resolved location and participants.
///
/// Only ever handed to [`crate::projection`]; it is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicnicAggregate {
    pub picnic: Picnic,
    pub location: Option<PicnicLocation>,
    pub participants: Vec<TeddyBear>,
}

/// Body of `POST /api/Picnics`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePicnicRequest {
    pub picnic_name: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(with = "crate::models::timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(default = "default_true")]
    pub has_music: bool,
    #[serde(default = "default_true")]
    pub has_food: bool,
    #[serde(default)]
    pub teddy_bears: Vec<String>,
}

/// Creation request after shape validation, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicnicDraft {
    pub picnic_name: PicnicName,
    pub location_name: Option<String>,
    pub start_time: NaiveDateTime,
    pub has_music: bool,
    pub has_food: bool,
    /// Trimmed, non-blank, first occurrence wins
    pub bear_names: Vec<String>,
}

impl TryFrom<CreatePicnicRequest> for PicnicDraft {
    type Error = ValidationError;

    fn try_from(req: CreatePicnicRequest) -> Result<Self, Self::Error> {
        let picnic_name = PicnicName::new(&req.picnic_name)?;

        let location_name = req
            .location_name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        let mut bear_names: Vec<String> = Vec::with_capacity(req.teddy_bears.len());
        for name in req.teddy_bears {
            let name = name.trim();
            if !name.is_empty() && !bear_names.iter().any(|n| n == name) {
                bear_names.push(name.to_owned());
            }
        }

        Ok(Self {
            picnic_name,
            location_name,
            start_time: req.start_time,
            has_music: req.has_music,
            has_food: req.has_food,
            bear_names,
        })
    }
}

/// Fully resolved picnic ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPicnic {
    pub picnic_name: PicnicName,
    pub location_id: Option<i64>,
    pub start_time: NaiveDateTime,
    pub has_music: bool,
    pub has_food: bool,
    pub participant_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(json: &str) -> Result<PicnicDraft, ValidationError> {
        let req: CreatePicnicRequest = serde_json::from_str(json).unwrap();
        PicnicDraft::try_from(req)
    }

    #[test]
    fn flags_default_to_true_when_absent() {
        let d = draft(r#"{"picnicName": "Fair", "startTime": "2024-06-01T12:00:00"}"#).unwrap();
        assert!(d.has_music);
        assert!(d.has_food);
        assert!(d.bear_names.is_empty());
        assert_eq!(d.location_name, None);
    }

    #[test]
    fn explicit_flags_are_kept() {
        let d = draft(
            r#"{"picnicName": "Fair", "startTime": "2024-06-01T12:00:00", "hasMusic": false, "hasFood": true}"#,
        )
        .unwrap();
        assert!(!d.has_music);
        assert!(d.has_food);
    }

    #[test]
    fn bear_names_are_deduplicated_in_order() {
        let d = draft(
            r#"{"picnicName": "Fair", "startTime": "2024-06-01T12:00:00",
                "teddyBears": ["Bob", " Alice ", "", "Bob", "Alice"]}"#,
        )
        .unwrap();
        assert_eq!(d.bear_names, vec!["Bob".to_owned(), "Alice".to_owned()]);
    }

    #[test]
    fn blank_location_name_is_none() {
        let d = draft(
            r#"{"picnicName": "Fair", "locationName": "  ", "startTime": "2024-06-01T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(d.location_name, None);
    }

    #[test]
    fn rejects_blank_picnic_name() {
        let err = draft(r#"{"picnicName": " ", "startTime": "2024-06-01T12:00:00"}"#).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "picnicName" }));
    }

    #[test]
    fn rejects_bad_start_time() {
        let res: Result<CreatePicnicRequest, _> =
            serde_json::from_str(r#"{"picnicName": "Fair", "startTime": "soon"}"#);
        assert!(res.is_err());
    }
}
