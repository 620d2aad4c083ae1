//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;
use wallhub_core::error::CoreError;
use wallhub_db::models::profile::{ProfileResponse, UpdateProfile};
use wallhub_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
///
/// The authenticated user's own profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// PUT /api/v1/profile
///
/// Self-service update of profile fields. Role and status are not
/// reachable from here; those move only through the admin surface.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::update_own(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}
