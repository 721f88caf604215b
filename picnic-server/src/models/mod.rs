//! Domain models with validation at construction
//!
//! Request payloads deserialize into plain structs; converting them into
//! the `New*` / draft types is where validation and defaults happen.
//! Invalid input returns ValidationError, not panic.

pub mod bear;
pub mod location;
pub mod name;
pub mod picnic;
pub mod timestamp;
pub mod validation;

pub use bear::{CreateTeddyBearRequest, NewTeddyBear, TeddyBear};
pub use location::{LocationFields, LocationPayload, PicnicLocation, DEFAULT_CAPACITY};
pub use name::{BearName, LocationName, PicnicName, MAX_NAME_LEN};
pub use picnic::{CreatePicnicRequest, NewPicnic, Picnic, PicnicAggregate, PicnicDraft};
pub use validation::ValidationError;
