//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, dashboard};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Authorization is enforced per-handler against the permission model, not
/// per-route, so a custom role holding e.g. `view_users` can read without
/// holding the full admin role.
///
/// ```text
/// GET    /users                      -> list_users
/// POST   /users/bulk                 -> bulk_action
/// GET    /users/{id}                 -> get_user
/// PUT    /users/{id}                 -> update_user
/// DELETE /users/{id}                 -> delete_user
/// PUT    /users/{id}/role            -> change_role
/// POST   /users/{id}/reset-password  -> reset_password
/// GET    /dashboard                  -> dashboard summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/bulk", post(admin::bulk_action))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/users/{id}/role", put(admin::change_role))
        .route("/users/{id}/reset-password", post(admin::reset_password))
        .route("/dashboard", get(dashboard::summary))
}
