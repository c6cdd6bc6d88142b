//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row. Catalog entities also carry the annotated variants returned by list
//! and detail queries; validated create payloads live in `kennel_core`.

pub mod breed;
pub mod dog;
pub mod session;
pub mod user;
