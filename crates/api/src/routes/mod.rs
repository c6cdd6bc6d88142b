pub mod breeds;
pub mod dogs;
pub mod health;
pub mod token;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /breeds/                 list (public), create (auth)
/// /breeds/{id}/            get (public), update, delete (auth)
///
/// /dogs/                   list (public), create (auth, caller becomes owner)
/// /dogs/{id}/              get (public), update, delete (owner)
///
/// /token/                  obtain access + refresh token (public)
/// /token/refresh/          refresh access token (public)
/// /token/revoke/           revoke a refresh token (public)
///
/// /users/                  register (public)
/// /users/me/               get, delete own account (auth)
/// ```
///
/// Every resource router carries full paths with a trailing slash and is
/// merged rather than nested.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(breeds::router())
        .merge(dogs::router())
        .merge(token::router())
        .merge(users::router())
}
