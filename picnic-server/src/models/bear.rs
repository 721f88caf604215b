//! Teddy bear records

use serde::{Deserialize, Serialize};

use super::name::BearName;
use super::validation::{optional_text, required_text, ValidationError};

const MAX_COLOR_LEN: usize = 20;
const MAX_OWNER_LEN: usize = 50;
const MAX_CHARACTERISTIC_LEN: usize = 50;

/// Stored teddy bear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeddyBear {
    pub id: i64,
    pub name: String,
    pub primary_color: String,
    pub accent_color: Option<String>,
    pub is_dressed: bool,
    pub owner_name: String,
    pub characteristic: Option<String>,
}

/// Body of `POST /api/TeddyBears`
///
/// Clients may echo an `id`; it is ignored since ids are generated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeddyBearRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub primary_color: String,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub is_dressed: Option<bool>,
    pub owner_name: String,
    #[serde(default)]
    pub characteristic: Option<String>,
}

/// Validated bear ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeddyBear {
    pub name: BearName,
    pub primary_color: String,
    pub accent_color: Option<String>,
    pub is_dressed: bool,
    pub owner_name: String,
    pub characteristic: Option<String>,
}

impl TryFrom<CreateTeddyBearRequest> for NewTeddyBear {
    type Error = ValidationError;

    fn try_from(req: CreateTeddyBearRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: BearName::new(&req.name)?,
            primary_color: required_text("primaryColor", &req.primary_color, MAX_COLOR_LEN)?,
            accent_color: optional_text("accentColor", req.accent_color.as_deref(), MAX_COLOR_LEN)?,
            is_dressed: req.is_dressed.unwrap_or(true),
            owner_name: required_text("ownerName", &req.owner_name, MAX_OWNER_LEN)?,
            characteristic: optional_text(
                "characteristic",
                req.characteristic.as_deref(),
                MAX_CHARACTERISTIC_LEN,
            )?,
        })
    }
}

impl NewTeddyBear {
    /// Attach the generated key.
    pub fn into_bear(self, id: i64) -> TeddyBear {
        TeddyBear {
            id,
            name: self.name.into_string(),
            primary_color: self.primary_color,
            accent_color: self.accent_color,
            is_dressed: self.is_dressed,
            owner_name: self.owner_name,
            characteristic: self.characteristic,
        }
    }
}
