//! Handlers for the `/admin/roles` resource and the permission catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use wallhub_core::access::{ensure_role_delete, ensure_role_manage};
use wallhub_core::error::CoreError;
use wallhub_core::permissions::PermissionId;
use wallhub_core::types::DbId;
use wallhub_db::models::role::{CreateRole, Role, UpdateRole};
use wallhub_db::repositories::{ProfileRepo, RoleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{load_actor, require_permission};
use crate::response::DataResponse;
use crate::state::AppState;

/// One catalog entry for the role editor.
#[derive(Debug, Serialize)]
pub struct PermissionInfo {
    pub id: PermissionId,
    pub category: &'static str,
}

/// GET /api/v1/admin/roles
///
/// All roles, highest priority first, ties broken by name.
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Role>>>> {
    require_permission(&state, &auth, PermissionId::ViewUsers).await?;

    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: roles }))
}

/// GET /api/v1/admin/permissions
///
/// The fixed permission catalog, grouped by display category client-side.
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PermissionInfo>>>> {
    require_permission(&state, &auth, PermissionId::ViewUsers).await?;

    let catalog = PermissionId::ALL
        .into_iter()
        .map(|id| PermissionInfo {
            id,
            category: id.category(),
        })
        .collect();

    Ok(Json(DataResponse { data: catalog }))
}

/// POST /api/v1/admin/roles
///
/// Create a role. Requires `manage_roles`; unknown permission ids in the
/// payload are rejected at deserialization.
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<DataResponse<Role>>)> {
    let actor = load_actor(&state, &auth).await?;
    ensure_role_manage(&actor)?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Role name must not be empty".into(),
        )));
    }

    let role = RoleRepo::create(&state.pool, &input).await?;

    tracing::info!(role = %role.name, admin_id = actor.id, "Role created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: role })))
}

/// PUT /api/v1/admin/roles/{id}
///
/// Update a role's display fields, permissions, color, or priority. The
/// name is immutable because profiles reference roles by name.
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<DataResponse<Role>>> {
    let actor = load_actor(&state, &auth).await?;
    ensure_role_manage(&actor)?;

    let role = RoleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;

    tracing::info!(role = %role.name, admin_id = actor.id, "Role updated");

    Ok(Json(DataResponse { data: role }))
}

/// DELETE /api/v1/admin/roles/{id}
///
/// Delete a role. System roles and roles still assigned to any profile are
/// rejected. Returns 204.
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = load_actor(&state, &auth).await?;

    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;

    let assigned = ProfileRepo::count_by_role(&state.pool, &role.name).await?;
    ensure_role_delete(&actor, &role.name, role.is_system_role, assigned)?;

    RoleRepo::delete(&state.pool, id).await?;

    tracing::info!(role = %role.name, admin_id = actor.id, "Role deleted");

    Ok(StatusCode::NO_CONTENT)
}
