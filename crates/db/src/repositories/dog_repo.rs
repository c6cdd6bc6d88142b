//! Repository for the `dogs` table.
//!
//! The list and detail queries attach breed-level aggregates computed by
//! correlated subqueries: the average age of breed-mates for the list, and
//! the breed-mate count for a single dog. Both are `NULL` for dogs without a
//! breed.

use kennel_core::dog::NewDog;
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::dog::{Dog, DogWithAvgAge, DogWithSameBreedCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, breed_id, gender, color, favorite_food, favorite_toy, owner_id";

/// Same columns, qualified with the `d` alias used by the annotated queries.
const QUALIFIED_COLUMNS: &str = "d.id, d.name, d.age, d.breed_id, d.gender, d.color, \
                                  d.favorite_food, d.favorite_toy, d.owner_id";

/// Foreign-key constraint linking `dogs.breed_id` to `breeds.id`.
pub const FK_DOGS_BREED: &str = "fk_dogs_breed_id";

/// Foreign-key constraint linking `dogs.owner_id` to `users.id`.
pub const FK_DOGS_OWNER: &str = "fk_dogs_owner_id";

/// Provides CRUD operations for dogs.
pub struct DogRepo;

impl DogRepo {
    /// Insert a new dog owned by `owner_id`, returning the created row.
    pub async fn create(pool: &PgPool, owner_id: DbId, input: &NewDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (name, age, breed_id, gender, color, favorite_food, favorite_toy, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.breed_id)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(&input.favorite_food)
            .bind(&input.favorite_toy)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a dog by ID without annotations.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a dog by ID, annotated with the number of dogs sharing its breed
    /// (the dog itself included).
    pub async fn find_with_same_breed_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DogWithSameBreedCount>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}, \
                    CASE WHEN d.breed_id IS NULL THEN NULL \
                         ELSE (SELECT COUNT(*) FROM dogs s WHERE s.breed_id = d.breed_id) \
                    END AS same_breed_count \
             FROM dogs d \
             WHERE d.id = $1"
        );
        sqlx::query_as::<_, DogWithSameBreedCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all dogs ordered by name, each annotated with the average age of
    /// the dogs sharing its breed.
    pub async fn list_with_avg_age(pool: &PgPool) -> Result<Vec<DogWithAvgAge>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS}, \
                    (SELECT AVG(s.age)::DOUBLE PRECISION FROM dogs s WHERE s.breed_id = d.breed_id) \
                        AS avg_age \
             FROM dogs d \
             ORDER BY d.name, d.id"
        );
        sqlx::query_as::<_, DogWithAvgAge>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace every writable field of a dog. The owner never changes.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewDog,
    ) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!(
            "UPDATE dogs SET
                name = $2,
                age = $3,
                breed_id = $4,
                gender = $5,
                color = $6,
                favorite_food = $7,
                favorite_toy = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.breed_id)
            .bind(&input.gender)
            .bind(&input.color)
            .bind(&input.favorite_food)
            .bind(&input.favorite_toy)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dog by ID. Returns `true` if a dog was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
