//! Role-based access control: actor resolution.
//!
//! Permission checks run against an [`Actor`] snapshot -- the authenticated
//! user's id plus their role's permission set, loaded once per request and
//! evaluated locally before any mutation is issued. A role that no longer
//! exists resolves to an empty permission set, so checks fail closed.

use wallhub_core::access::ensure_permission;
use wallhub_core::actor::Actor;
use wallhub_core::permissions::PermissionId;
use wallhub_db::repositories::RoleRepo;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Resolve the authenticated user into an [`Actor`] by loading their role's
/// permission set.
pub async fn load_actor(state: &AppState, auth: &AuthUser) -> Result<Actor, AppError> {
    let role = RoleRepo::find_by_name(&state.pool, &auth.role).await?;
    Ok(match role {
        Some(role) => Actor::new(auth.user_id, role.name, role.permissions.0),
        None => Actor::unresolved(auth.user_id, &auth.role),
    })
}

/// Resolve the actor and require a single permission, as one step.
///
/// ```ignore
/// async fn gated(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<()>> {
///     let actor = require_permission(&state, &auth, PermissionId::ManageUsers).await?;
///     // actor holds manage_users (directly or via system_admin) here
///     Ok(Json(()))
/// }
/// ```
pub async fn require_permission(
    state: &AppState,
    auth: &AuthUser,
    permission: PermissionId,
) -> Result<Actor, AppError> {
    let actor = load_actor(state, auth).await?;
    ensure_permission(&actor, permission)?;
    Ok(actor)
}
