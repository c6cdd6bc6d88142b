//! Repository for the `breeds` table.

use kennel_core::breed::NewBreed;
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::breed::{Breed, BreedWithDogCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, size, friendliness, trainability, shedding_amount, exercise_needs";

/// Provides CRUD operations for breeds.
pub struct BreedRepo;

impl BreedRepo {
    /// Insert a new breed, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewBreed) -> Result<Breed, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeds (name, size, friendliness, trainability, shedding_amount, exercise_needs)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(&input.name)
            .bind(input.size.as_str())
            .bind(input.friendliness)
            .bind(input.trainability)
            .bind(input.shedding_amount)
            .bind(input.exercise_needs)
            .fetch_one(pool)
            .await
    }

    /// Find a breed by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds WHERE id = $1");
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a breed with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM breeds WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// List all breeds ordered by name, each annotated with the number of
    /// dogs that reference it.
    ///
    /// The count is a correlated subquery evaluated in the same statement, so
    /// it reflects the table at query time. Breeds without dogs report `0`.
    pub async fn list_with_dog_count(pool: &PgPool) -> Result<Vec<BreedWithDogCount>, sqlx::Error> {
        sqlx::query_as::<_, BreedWithDogCount>(
            "SELECT b.id, b.name, b.size, b.friendliness, b.trainability, \
                    b.shedding_amount, b.exercise_needs, \
                    (SELECT COUNT(*) FROM dogs d WHERE d.breed_id = b.id) AS dog_count \
             FROM breeds b \
             ORDER BY b.name, b.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace every writable field of a breed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewBreed,
    ) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!(
            "UPDATE breeds SET
                name = $2,
                size = $3,
                friendliness = $4,
                trainability = $5,
                shedding_amount = $6,
                exercise_needs = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.size.as_str())
            .bind(input.friendliness)
            .bind(input.trainability)
            .bind(input.shedding_amount)
            .bind(input.exercise_needs)
            .fetch_optional(pool)
            .await
    }

    /// Delete a breed by ID. Dogs referencing it keep existing with their
    /// `breed_id` cleared (`ON DELETE SET NULL`).
    ///
    /// Returns `true` if a breed was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM breeds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
