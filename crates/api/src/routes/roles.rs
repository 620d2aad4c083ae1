//! Route definitions for the `/admin/roles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /roles        -> list_roles
/// POST   /roles        -> create_role
/// PUT    /roles/{id}   -> update_role
/// DELETE /roles/{id}   -> delete_role
/// GET    /permissions  -> list_permissions (catalog)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/{id}",
            axum::routing::put(roles::update_role).delete(roles::delete_role),
        )
        .route("/permissions", get(roles::list_permissions))
}
