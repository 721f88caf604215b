//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool, owns nothing
//! - Maps rows through a private `*Row` type into the domain model
//! - Lets UNIQUE and FOREIGN KEY constraints decide conflicts

pub mod bears;
pub mod locations;
pub mod picnics;

pub use super::error::DbError;
pub use bears::BearRepo;
pub use locations::LocationRepo;
pub use picnics::{PicnicFilter, PicnicRepo};
