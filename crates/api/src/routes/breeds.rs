//! Route definitions for the `/breeds` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::breeds;
use crate::state::AppState;

/// Breed routes, merged into the `/api` tree.
///
/// ```text
/// GET    /breeds/         -> list_breeds
/// POST   /breeds/         -> create_breed
/// GET    /breeds/{id}/    -> get_breed
/// PUT    /breeds/{id}/    -> update_breed
/// DELETE /breeds/{id}/    -> delete_breed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/breeds/",
            get(breeds::list_breeds).post(breeds::create_breed),
        )
        .route(
            "/breeds/{id}/",
            get(breeds::get_breed)
                .put(breeds::update_breed)
                .delete(breeds::delete_breed),
        )
}
