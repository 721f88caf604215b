//! Unique entity names
//!
//! Bears, locations and picnics are all addressed by a unique name of at
//! most 50 characters. Each gets its own newtype so a bear name can't be
//! passed where a picnic name is expected.

use std::fmt;

use super::validation::{required_text, ValidationError};

/// Maximum length shared by every unique name column
pub const MAX_NAME_LEN: usize = 50;

macro_rules! entity_name {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validate and trim a raw name.
            pub fn new(s: &str) -> Result<Self, ValidationError> {
                required_text($field, s, MAX_NAME_LEN).map(Self)
            }

            /// Get the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_name!(
    /// Validated teddy bear name
    ///
    /// # Example
    /// ```
    /// use picnic_server::models::BearName;
    ///
    /// assert!(BearName::new("Paddington").is_ok());
    /// assert!(BearName::new("   ").is_err());
    /// ```
    BearName,
    "name"
);

entity_name!(
    /// Validated picnic location name
    LocationName,
    "locationName"
);

entity_name!(
    /// Validated picnic name
    PicnicName,
    "picnicName"
);
