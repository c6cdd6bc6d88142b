//! Handlers for the `/breeds` resource.
//!
//! Reads are public. Writes require authentication but no ownership, since
//! breeds have no owner.
//!
//! Read handlers still take [`MaybeAuthUser`] so that a bad bearer token is
//! reported instead of being treated as anonymous.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kennel_core::access::Method;
use kennel_core::breed::{validate_breed, BreedInput};
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use kennel_db::models::breed::{Breed, BreedWithDogCount};
use kennel_db::repositories::BreedRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::permissions::{authorize, BREED_POLICY};
use crate::state::AppState;

/// GET /api/breeds/
///
/// List all breeds alphabetically, each with its `dog_count`.
pub async fn list_breeds(
    _caller: MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BreedWithDogCount>>> {
    let breeds = BreedRepo::list_with_dog_count(&state.pool).await?;
    Ok(Json(breeds))
}

/// POST /api/breeds/
pub async fn create_breed(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    payload: Result<Json<BreedInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Breed>)> {
    authorize(BREED_POLICY, Method::Post, &caller, None)?;
    let Json(input) = payload?;

    let breed = validate_breed(&input)?;
    let created = BreedRepo::create(&state.pool, &breed).await?;

    tracing::info!(breed_id = created.id, user_id = ?caller.user_id(), "Breed created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/breeds/{id}/
///
/// The detail view carries no `dog_count`.
pub async fn get_breed(
    _caller: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Breed>> {
    let Path(id) = path?;
    let breed = BreedRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Breed", id }))?;
    Ok(Json(breed))
}

/// PUT /api/breeds/{id}/
///
/// Full replacement; every writable field must be supplied.
pub async fn update_breed(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<BreedInput>, JsonRejection>,
) -> AppResult<Json<Breed>> {
    let Path(id) = path?;
    authorize(BREED_POLICY, Method::Put, &caller, None)?;
    if !BreedRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Breed", id }));
    }
    let Json(input) = payload?;

    let breed = validate_breed(&input)?;
    let updated = BreedRepo::update(&state.pool, id, &breed)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Breed", id }))?;

    tracing::info!(breed_id = id, user_id = ?caller.user_id(), "Breed updated");

    Ok(Json(updated))
}

/// DELETE /api/breeds/{id}/
///
/// Dogs of this breed are kept; their `breed` becomes null.
pub async fn delete_breed(
    caller: MaybeAuthUser,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    authorize(BREED_POLICY, Method::Delete, &caller, None)?;

    if !BreedRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Breed", id }));
    }

    tracing::info!(breed_id = id, user_id = ?caller.user_id(), "Breed deleted");

    Ok(StatusCode::NO_CONTENT)
}
