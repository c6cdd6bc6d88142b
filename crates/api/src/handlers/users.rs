//! Handlers for the `/users` resource (registration and the caller's own
//! account).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kennel_core::error::CoreError;
use kennel_db::models::user::{CreateUser, UserResponse};
use kennel_db::repositories::UserRepo;

use crate::auth::password::{hash_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::handlers::token::CredentialsRequest;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/users/
///
/// Register a new account. A taken username is reported as 409.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(input) = payload?;
    let credentials = input.into_credentials(MIN_PASSWORD_LENGTH)?;

    let password_hash = hash_password(&credentials.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: credentials.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/me/
pub async fn get_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/users/me/
///
/// Removes the caller's account together with every dog they own and all of
/// their sessions.
pub async fn delete_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, auth_user.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }));
    }

    tracing::info!(user_id = auth_user.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
