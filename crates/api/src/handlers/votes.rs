//! Handlers for wallpaper star ratings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use wallhub_core::error::CoreError;
use wallhub_core::types::DbId;
use wallhub_db::models::vote::{CreateVote, VoteSummary};
use wallhub_db::repositories::{ProfileRepo, VoteRepo, WallpaperRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/wallpapers/{id}/votes
///
/// Public vote count and mean rating for a wallpaper.
pub async fn vote_summary(
    State(state): State<AppState>,
    Path(wallpaper_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteSummary>>> {
    let summary = VoteRepo::summary(&state.pool, wallpaper_id).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/wallpapers/{id}/votes
///
/// Cast a 1-5 star vote. One vote per user per wallpaper; a second vote is
/// a conflict.
pub async fn cast_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(wallpaper_id): Path<DbId>,
    Json(input): Json<CreateVote>,
) -> AppResult<(StatusCode, Json<DataResponse<VoteSummary>>)> {
    if !(1..=5).contains(&input.rating) {
        return Err(AppError::Core(CoreError::Validation(
            "Rating must be between 1 and 5".into(),
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

    if VoteRepo::find_by_user_and_wallpaper(&state.pool, wallpaper_id, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already voted for this wallpaper".into(),
        )));
    }

    VoteRepo::create(&state.pool, wallpaper_id, auth.user_id, input.rating).await?;
    ProfileRepo::increment_votes(&state.pool, auth.user_id).await?;

    let summary = VoteRepo::summary(&state.pool, wallpaper_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}
