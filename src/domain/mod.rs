//! Core domain model: the repository index and the value objects the
//! commands operate on.

pub mod entities;
pub mod value_objects;
