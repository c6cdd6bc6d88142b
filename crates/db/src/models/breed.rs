//! Breed entity model.

use kennel_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `breeds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Breed {
    pub id: DbId,
    pub name: String,
    /// One of `tiny`, `small`, `medium`, `large`.
    pub size: String,
    pub friendliness: i16,
    pub trainability: i16,
    pub shedding_amount: i16,
    pub exercise_needs: i16,
}

/// A breed annotated with the number of dogs referencing it.
///
/// Only produced by the list query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BreedWithDogCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub breed: Breed,
    pub dog_count: i64,
}
