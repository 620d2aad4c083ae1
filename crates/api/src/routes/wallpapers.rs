//! Route definitions for wallpapers and their nested comments/votes.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{comments, votes, wallpapers};
use crate::state::AppState;

/// Public routes mounted at `/wallpapers`, plus `/comments/{id}` for
/// deletion.
///
/// ```text
/// GET    /wallpapers                  -> list_wallpapers (approved only)
/// POST   /wallpapers                  -> create_wallpaper (upload_wallpapers)
/// GET    /wallpapers/{slug}           -> get_wallpaper (detail is by slug)
/// PUT    /wallpapers/{id}             -> update_wallpaper (manage_wallpapers)
/// DELETE /wallpapers/{id}             -> delete_wallpaper (delete_wallpapers)
/// POST   /wallpapers/{id}/download    -> download_wallpaper
/// POST   /wallpapers/{id}/approve     -> approve_wallpaper (approve_wallpapers)
/// POST   /wallpapers/{id}/feature     -> feature_wallpaper (approve_wallpapers)
/// GET    /wallpapers/{id}/comments    -> list_comments
/// POST   /wallpapers/{id}/comments    -> create_comment
/// GET    /wallpapers/{id}/votes       -> vote_summary
/// POST   /wallpapers/{id}/votes       -> cast_vote
/// DELETE /comments/{id}               -> delete_comment
/// ```
///
/// The detail GET reads its parameter as a slug while the sibling methods
/// read a numeric id; the route segment is shared so the captures must use
/// one name.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/wallpapers",
            get(wallpapers::list_wallpapers).post(wallpapers::create_wallpaper),
        )
        .route(
            "/wallpapers/{id}",
            get(wallpapers::get_wallpaper)
                .put(wallpapers::update_wallpaper)
                .delete(wallpapers::delete_wallpaper),
        )
        .route(
            "/wallpapers/{id}/download",
            post(wallpapers::download_wallpaper),
        )
        .route(
            "/wallpapers/{id}/approve",
            post(wallpapers::approve_wallpaper),
        )
        .route(
            "/wallpapers/{id}/feature",
            post(wallpapers::feature_wallpaper),
        )
        .route(
            "/wallpapers/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/wallpapers/{id}/votes",
            get(votes::vote_summary).post(votes::cast_vote),
        )
        .route("/comments/{id}", delete(comments::delete_comment))
}

/// Moderation listing mounted at `/admin/wallpapers`.
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/wallpapers", get(wallpapers::list_all_wallpapers))
}
