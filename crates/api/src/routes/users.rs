//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST   /users/          -> register
/// GET    /users/me/       -> get_me (requires auth)
/// DELETE /users/me/       -> delete_me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", post(users::register))
        .route("/users/me/", get(users::get_me).delete(users::delete_me))
}
