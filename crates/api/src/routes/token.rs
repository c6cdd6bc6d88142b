//! Route definitions for the `/token` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::token;
use crate::state::AppState;

/// ```text
/// POST /token/            -> obtain_token
/// POST /token/refresh/    -> refresh_token
/// POST /token/revoke/     -> revoke_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token/", post(token::obtain_token))
        .route("/token/refresh/", post(token::refresh_token))
        .route("/token/revoke/", post(token::revoke_token))
}
