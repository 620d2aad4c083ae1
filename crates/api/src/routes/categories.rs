//! Route definitions for categories.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Public routes mounted at `/categories`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route("/categories/{slug}", get(categories::get_category))
}

/// Admin routes mounted at `/admin/categories`.
///
/// ```text
/// POST   /            -> create_category (manage_settings)
/// PUT    /{id}        -> update_category (manage_settings)
/// DELETE /{id}        -> delete_category (manage_settings)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(categories::create_category))
        .route(
            "/{id}",
            axum::routing::put(categories::update_category).delete(categories::delete_category),
        )
}
