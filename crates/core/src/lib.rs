//! Domain rules for the kennel catalog: shared types, validation, and
//! access-control policies. Nothing in this crate performs I/O.

pub mod access;
pub mod breed;
pub mod dog;
pub mod error;
pub mod types;
pub mod validation;
