//! Handlers for wallpaper comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wallhub_core::access::AccessError;
use wallhub_core::error::CoreError;
use wallhub_core::permissions::PermissionId;
use wallhub_core::types::DbId;
use wallhub_db::models::comment::{Comment, CreateComment};
use wallhub_db::models::notification::NotificationKind;
use wallhub_db::repositories::{CommentRepo, WallpaperRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::notifications::notify;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::load_actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/wallpapers/{id}/comments
///
/// Public comment listing for a wallpaper, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(wallpaper_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    let comments = CommentRepo::list_for_wallpaper(&state.pool, wallpaper_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/wallpapers/{id}/comments
///
/// Post a comment. Requires authentication; the wallpaper must exist.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(wallpaper_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment must not be empty".into(),
        )));
    }

    if WallpaperRepo::find_by_id(&state.pool, wallpaper_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Wallpaper",
            id: wallpaper_id,
        }));
    }

    let comment =
        CommentRepo::create(&state.pool, wallpaper_id, auth.user_id, input.body.trim()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /api/v1/comments/{id}
///
/// Authors may delete their own comments; anyone else needs moderator
/// standing. Returns 204.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    let own_comment = comment.user_id == auth.user_id;
    if !own_comment {
        let actor = load_actor(&state, &auth).await?;
        if !actor.is_moderator() {
            return Err(AppError::Access(AccessError::PermissionDenied(
                PermissionId::ModerateComments,
            )));
        }
    }

    CommentRepo::delete(&state.pool, id).await?;

    if !own_comment {
        notify(
            &state.pool,
            comment.user_id,
            NotificationKind::Info,
            "One of your comments was removed by a moderator",
        )
        .await;
        tracing::info!(
            comment_id = id,
            moderator_id = auth.user_id,
            "Comment removed by moderator",
        );
    }

    Ok(StatusCode::NO_CONTENT)
}
