//! Route tree assembly.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod notifications;
pub mod onboarding;
pub mod profile;
pub mod roles;
pub mod wallpapers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      signup (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
///
/// /profile                          get, update own profile (requires auth)
///
/// /onboarding/steps                 list step log (requires auth)
/// /onboarding/steps/{step_name}     record step (requires auth)
/// /onboarding/complete              finish flow (requires auth)
///
/// /admin/users                      list (view_users), bulk (per-action permission)
/// /admin/users/{id}                 get, update, delete
/// /admin/users/{id}/role            change role (self-demotion guarded)
/// /admin/roles                      list, create
/// /admin/roles/{id}                 update, delete (system/in-use guarded)
/// /admin/permissions                permission catalog
/// /admin/dashboard                  entity counts (view_dashboard)
/// /admin/wallpapers                 moderation listing (manage_wallpapers)
/// /admin/categories                 create; /{id} update, delete (manage_settings)
///
/// /wallpapers                       public listing, upload
/// /wallpapers/{slug}                public detail with rating
/// /wallpapers/{id}/...              download, approve, feature, comments, votes
/// /comments/{id}                    delete (author or moderator)
/// /categories                       public listing with counts
///
/// /notifications                    list, unread-count, read, read-all
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // The authenticated user's own surface.
        .nest("/profile", profile::router())
        .nest("/onboarding", onboarding::router())
        .nest("/notifications", notifications::router())
        // Admin routes (user management, roles, moderation, categories).
        .nest("/admin", admin::router())
        .nest("/admin", roles::router())
        .nest("/admin", wallpapers::admin_router())
        .nest("/admin/categories", categories::admin_router())
        // Public content routes.
        .merge(wallpapers::router())
        .merge(categories::router())
}
