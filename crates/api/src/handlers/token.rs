//! Handlers for the `/token` resource (obtain, refresh, revoke).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kennel_core::error::{CoreError, FieldErrors};
use kennel_core::types::DbId;
use kennel_core::validation::{required_text, MSG_BLANK, MSG_REQUIRED};
use kennel_db::models::session::{CreateSession, UserSession};
use kennel_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /token/` and `POST /users/`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /token/refresh/` and `POST /token/revoke/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Returned by `POST /token/`.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Returned by `POST /token/refresh/`.
#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access: String,
}

/// Username and password after presence checks.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Require a non-blank username and password, and a password of at least
    /// `min_password_length` characters.
    ///
    /// The password is taken verbatim; only the username is trimmed.
    pub fn into_credentials(self, min_password_length: usize) -> Result<Credentials, CoreError> {
        let mut errors = FieldErrors::new();
        let username = required_text(&mut errors, "username", self.username.as_deref());
        let password = match self.password {
            None => {
                errors.add("password", MSG_REQUIRED);
                None
            }
            Some(p) if p.is_empty() => {
                errors.add("password", MSG_BLANK);
                None
            }
            Some(p) => match validate_password_strength(&p, min_password_length) {
                Ok(()) => Some(p),
                Err(msg) => {
                    errors.add("password", msg);
                    None
                }
            },
        };

        errors.into_result()?;

        let (Some(username), Some(password)) = (username, password) else {
            return Err(CoreError::Internal("credential validation lost a field".into()));
        };
        Ok(Credentials { username, password })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/token/
///
/// Exchange a username and password for an access token and a refresh token.
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<Json<TokenPair>> {
    let Json(input) = payload?;
    let credentials = input.into_credentials(0)?;

    let user = UserRepo::find_by_username(&state.pool, &credentials.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected token request: wrong password");
        return Err(invalid_credentials());
    }

    let access = issue_access_token(&state, user.id)?;
    let (refresh, refresh_token_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at: state.config.jwt.refresh_token_expires_at(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Issued token pair");

    Ok(Json(TokenPair { access, refresh }))
}

/// POST /api/token/refresh/
///
/// Exchange a live refresh token for a new access token. The refresh token
/// itself stays valid until it expires.
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<AccessToken>> {
    let Json(input) = payload?;
    let session = live_session(&state, input).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    let access = issue_access_token(&state, user.id)?;
    Ok(Json(AccessToken { access }))
}

/// POST /api/token/revoke/
///
/// Invalidate a refresh token (sign out). Access tokens already issued stay
/// valid until they expire. Returns 204 No Content.
pub async fn revoke_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = payload?;
    let session = live_session(&state, input).await?;

    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid_refresh_token());
    }

    tracing::info!(user_id = session.user_id, session_id = session.id, "Refresh token revoked");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up the unrevoked, unexpired session behind a refresh token.
async fn live_session(state: &AppState, input: RefreshRequest) -> AppResult<UserSession> {
    let Some(refresh) = input.refresh.filter(|r| !r.is_empty()) else {
        let mut errors = FieldErrors::new();
        errors.add("refresh", MSG_REQUIRED);
        return Err(CoreError::InvalidFields(errors).into());
    };

    let token_hash = hash_refresh_token(&refresh);
    SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)
}

fn issue_access_token(state: &AppState, user_id: DbId) -> AppResult<String> {
    generate_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized("Token is invalid or expired".into()))
}
