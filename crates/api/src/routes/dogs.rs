//! Route definitions for the `/dogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dogs;
use crate::state::AppState;

/// Dog routes, merged into the `/api` tree.
///
/// ```text
/// GET    /dogs/           -> list_dogs
/// POST   /dogs/           -> create_dog
/// GET    /dogs/{id}/      -> get_dog
/// PUT    /dogs/{id}/      -> update_dog (owner only)
/// DELETE /dogs/{id}/      -> delete_dog (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dogs/", get(dogs::list_dogs).post(dogs::create_dog))
        .route(
            "/dogs/{id}/",
            get(dogs::get_dog)
                .put(dogs::update_dog)
                .delete(dogs::delete_dog),
        )
}
