//! Handlers for the `/dogs` resource.
//!
//! Reads are public. Creating a dog requires authentication and makes the
//! caller its owner; updating or deleting one requires being that owner.
//!
//! Read handlers still take [`MaybeAuthUser`] so that a bad bearer token is
//! reported instead of being treated as anonymous.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kennel_core::access::Method;
use kennel_core::dog::{validate_dog, DogInput, NewDog};
use kennel_core::error::{CoreError, FieldErrors};
use kennel_core::types::DbId;
use kennel_db::models::dog::{Dog, DogWithAvgAge, DogWithSameBreedCount};
use kennel_db::repositories::dog_repo::{FK_DOGS_BREED, FK_DOGS_OWNER};
use kennel_db::repositories::{BreedRepo, DogRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::permissions::{authorize, DOG_POLICY};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/dogs/
///
/// List all dogs alphabetically. Each dog carries `avg_age`, the mean age
/// of the dogs sharing its breed (null when it has none).
pub async fn list_dogs(
    _caller: MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DogWithAvgAge>>> {
    let dogs = DogRepo::list_with_avg_age(&state.pool).await?;
    Ok(Json(dogs))
}

/// POST /api/dogs/
///
/// The authenticated caller becomes the owner.
pub async fn create_dog(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<DogInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Dog>)> {
    authorize(DOG_POLICY, Method::Post, &caller, None)?;
    let owner_id = caller.require()?.user_id;
    let Json(input) = payload?;

    let dog = validate_dog_payload(&state.pool, &input).await?;
    let created = DogRepo::create(&state.pool, owner_id, &dog)
        .await
        .map_err(|e| write_violation(e, dog.breed_id))?;

    tracing::info!(dog_id = created.id, user_id = owner_id, "Dog created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/dogs/{id}/
///
/// The detail view carries `same_breed_count`, the number of dogs sharing
/// this dog's breed including itself.
pub async fn get_dog(
    _caller: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DogWithSameBreedCount>> {
    let Path(id) = path?;
    let dog = DogRepo::find_with_same_breed_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dog", id }))?;
    Ok(Json(dog))
}

/// PUT /api/dogs/{id}/
///
/// Full replacement by the owner. Optional fields left out become null.
pub async fn update_dog(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<DogInput>, JsonRejection>,
) -> AppResult<Json<Dog>> {
    let Path(id) = path?;
    let existing = load_for_write(&state.pool, &caller, Method::Put, id).await?;
    let Json(input) = payload?;

    let dog = validate_dog_payload(&state.pool, &input).await?;
    let updated = DogRepo::update(&state.pool, existing.id, &dog)
        .await
        .map_err(|e| write_violation(e, dog.breed_id))?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dog", id }))?;

    tracing::info!(dog_id = id, user_id = existing.owner_id, "Dog updated");

    Ok(Json(updated))
}

/// DELETE /api/dogs/{id}/
pub async fn delete_dog(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    let existing = load_for_write(&state.pool, &caller, Method::Delete, id).await?;

    if !DogRepo::delete(&state.pool, existing.id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Dog", id }));
    }

    tracing::info!(dog_id = id, user_id = existing.owner_id, "Dog deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the request-level check, load the dog, then run the ownership check.
async fn load_for_write(
    pool: &PgPool,
    caller: &MaybeAuthUser,
    method: Method,
    id: DbId,
) -> AppResult<Dog> {
    authorize(DOG_POLICY, method, caller, None)?;

    let dog = DogRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dog", id }))?;

    authorize(DOG_POLICY, method, caller, Some(dog.owner_id))?;
    Ok(dog)
}

/// Validate the payload and confirm the referenced breed exists.
async fn validate_dog_payload(pool: &PgPool, input: &DogInput) -> AppResult<NewDog> {
    let dog = validate_dog(input)?;
    if let Some(breed_id) = dog.breed_id {
        if !BreedRepo::exists(pool, breed_id).await? {
            return Err(unknown_breed(breed_id));
        }
    }
    Ok(dog)
}

/// Map foreign-key violations raised by a dog write.
///
/// The breed can vanish between the existence check and the write; that is
/// reported the same way as a missing breed. The owner can vanish too when
/// an account is deleted while its access token is still live; the caller
/// then no longer identifies a user.
fn write_violation(err: sqlx::Error, breed_id: Option<DbId>) -> AppError {
    let constraint = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .map(str::to_owned);
    match (constraint.as_deref(), breed_id) {
        (Some(FK_DOGS_BREED), Some(breed_id)) => unknown_breed(breed_id),
        (Some(FK_DOGS_OWNER), _) => {
            tracing::debug!("Dog write by a deleted account");
            AppError::Core(CoreError::Unauthorized(
                "User not found for the provided token.".into(),
            ))
        }
        _ => AppError::Database(err),
    }
}

fn unknown_breed(breed_id: DbId) -> AppError {
    let mut errors = FieldErrors::new();
    errors.add(
        "breed",
        format!("Invalid pk \"{breed_id}\" - object does not exist."),
    );
    AppError::Core(CoreError::InvalidFields(errors))
}
