//! Dog entity model and its read-time annotations.

use kennel_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub name: String,
    pub age: i16,
    #[serde(rename = "breed")]
    pub breed_id: Option<DbId>,
    pub gender: String,
    pub color: String,
    pub favorite_food: Option<String>,
    pub favorite_toy: Option<String>,
    /// Set from the authenticated creator; never part of API output.
    #[serde(skip_serializing)]
    pub owner_id: DbId,
}

/// A dog annotated with the average age of its breed-mates (list view).
///
/// `avg_age` is `None` when the dog has no breed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DogWithAvgAge {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub dog: Dog,
    pub avg_age: Option<f64>,
}

/// A dog annotated with how many dogs share its breed, itself included
/// (detail view).
///
/// `same_breed_count` is `None` when the dog has no breed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DogWithSameBreedCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub dog: Dog,
    pub same_breed_count: Option<i64>,
}
