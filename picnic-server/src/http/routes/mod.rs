//! Route handlers organized by resource

pub mod bears;
pub mod health;
pub mod locations;
pub mod picnics;
pub mod swagger;
