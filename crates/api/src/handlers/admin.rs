//! Handlers for the `/admin/users` resource (user management).
//!
//! Every mutation runs its self-protection guard from
//! `wallhub_core::access` against the actor's cached snapshot before any
//! write is issued, so invariant violations cost no round-trip.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use wallhub_core::access::{
    ensure_bulk_action, ensure_role_change, ensure_user_delete, BulkAction,
};
use wallhub_core::error::CoreError;
use wallhub_core::permissions::PermissionId;
use wallhub_core::types::DbId;
use wallhub_db::models::notification::NotificationKind;
use wallhub_db::models::profile::{ProfileFilter, ProfileResponse, UpdateProfile, UserStatus};
use wallhub_db::repositories::{ProfileRepo, RoleRepo, SessionRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::handlers::notifications::notify;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{load_actor, require_permission};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/users/{id}`. Role changes go through the
/// dedicated role endpoint so the demotion guard always applies.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub status: Option<UserStatus>,
}

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role_name: String,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Request body for `POST /admin/users/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkActionRequest {
    pub user_ids: Vec<DbId>,
    pub action: BulkAction,
}

/// Per-target failure inside a bulk action.
#[derive(Debug, Serialize)]
pub struct BulkFailure {
    pub id: DbId,
    pub error: String,
}

/// Aggregate outcome of a bulk action. The batch continues past individual
/// failures; nothing is rolled back.
#[derive(Debug, Serialize)]
pub struct BulkActionResponse {
    pub action: BulkAction,
    pub updated: Vec<DbId>,
    pub failed: Vec<BulkFailure>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
///
/// List profiles with optional search/role/status filters.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ProfileFilter>,
) -> AppResult<Json<DataResponse<Vec<ProfileResponse>>>> {
    require_permission(&state, &auth, PermissionId::ViewUsers).await?;

    let profiles = ProfileRepo::list(&state.pool, &filter).await?;
    let responses: Vec<ProfileResponse> = profiles.into_iter().map(Into::into).collect();

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    require_permission(&state, &auth, PermissionId::ViewUsers).await?;

    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's display name and/or status.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    require_permission(&state, &auth, PermissionId::ManageUsers).await?;

    if ProfileRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    if let Some(status) = input.status {
        ProfileRepo::set_status(&state.pool, id, status).await?;
    }
    if input.full_name.is_some() {
        let update = UpdateProfile {
            full_name: input.full_name,
            ..UpdateProfile::default()
        };
        ProfileRepo::update_own(&state.pool, id, &update).await?;
    }

    // Re-read the whole row rather than patching a cached copy.
    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, admin_id = auth.user_id, "User updated");

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Assign a new role. An admin may not move their own account off the
/// `admin` role.
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeRoleRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let actor = load_actor(&state, &auth).await?;
    ensure_role_change(&actor, id, &input.role_name)?;

    let role = RoleRepo::find_by_name(&state.pool, &input.role_name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "Role",
                name: input.role_name.clone(),
            })
        })?;

    let profile = ProfileRepo::set_role(&state.pool, id, &role.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    notify(
        &state.pool,
        id,
        NotificationKind::Info,
        &format!("Your role was changed to {}", role.display_name),
    )
    .await;

    tracing::info!(
        user_id = id,
        admin_id = actor.id,
        role = %role.name,
        "User role changed",
    );

    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Hard-delete a user. Self-deletion is always rejected. Returns 204.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = load_actor(&state, &auth).await?;
    ensure_user_delete(&actor, id)?;

    let deleted = ProfileRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, admin_id = actor.id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Admin-initiated password reset. Requires `manage_users`; every session
/// of the target is revoked. Returns 204.
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    require_permission(&state, &auth, PermissionId::ManageUsers).await?;

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = ProfileRepo::update_password(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, admin_id = auth.user_id, "Password reset by admin");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/bulk
///
/// Apply an action to a set of users. A batch containing the actor is
/// rejected wholesale before any write; past that gate the batch continues
/// on per-target failures and reports them in the aggregate response.
pub async fn bulk_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BulkActionRequest>,
) -> AppResult<Json<DataResponse<BulkActionResponse>>> {
    if input.user_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No users selected".into(),
        )));
    }

    let actor = load_actor(&state, &auth).await?;
    ensure_bulk_action(&actor, &input.user_ids, input.action)?;

    let mut updated = Vec::new();
    let mut failed = Vec::new();

    for &id in &input.user_ids {
        let result = match input.action {
            BulkAction::Activate => {
                ProfileRepo::set_status(&state.pool, id, UserStatus::Active).await
            }
            BulkAction::Deactivate => {
                ProfileRepo::set_status(&state.pool, id, UserStatus::Inactive).await
            }
            BulkAction::Delete => ProfileRepo::delete(&state.pool, id).await,
        };

        match result {
            Ok(true) => updated.push(id),
            Ok(false) => failed.push(BulkFailure {
                id,
                error: "User not found".into(),
            }),
            Err(e) => {
                tracing::warn!(user_id = id, error = %e, "Bulk action target failed");
                failed.push(BulkFailure {
                    id,
                    error: "Store write failed".into(),
                });
            }
        }
    }

    tracing::info!(
        admin_id = actor.id,
        action = ?input.action,
        updated = updated.len(),
        failed = failed.len(),
        "Bulk action applied",
    );

    Ok(Json(DataResponse {
        data: BulkActionResponse {
            action: input.action,
            updated,
            failed,
        },
    }))
}
