//! Self-protection guards for the administrative surface.
//!
//! Every guard is pure and runs against the actor's cached snapshot before
//! any store write is issued; a violation short-circuits the operation with
//! no round-trip. The handlers in `wallhub-api` call these ahead of the
//! repository mutation they gate.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::permissions::PermissionId;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Missing required permission: {0}")]
    PermissionDenied(PermissionId),

    #[error("You cannot change your own admin role")]
    SelfDemotion,

    #[error("You cannot delete your own account")]
    SelfDeletion,

    #[error("You cannot perform bulk actions on your own account")]
    SelfTarget,

    #[error("Cannot delete role '{name}': {assigned} user(s) are assigned to it")]
    RoleInUse { name: String, assigned: i64 },

    #[error("System roles cannot be deleted")]
    SystemRole,
}

/// An action applied to a set of user profiles at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
}

impl BulkAction {
    pub fn required_permission(self) -> PermissionId {
        match self {
            BulkAction::Activate | BulkAction::Deactivate => PermissionId::ManageUsers,
            BulkAction::Delete => PermissionId::DeleteUsers,
        }
    }
}

/// Require a single permission on the actor.
pub fn ensure_permission(actor: &Actor, permission: PermissionId) -> Result<(), AccessError> {
    if actor.has_permission(permission) {
        Ok(())
    } else {
        Err(AccessError::PermissionDenied(permission))
    }
}

/// Guard a role change on `target_id`.
///
/// An admin may not move their own account off the `admin` role; past that,
/// the operation requires `manage_users`.
pub fn ensure_role_change(
    actor: &Actor,
    target_id: DbId,
    new_role_name: &str,
) -> Result<(), AccessError> {
    if target_id == actor.id && actor.is_admin() && new_role_name != ROLE_ADMIN {
        return Err(AccessError::SelfDemotion);
    }
    ensure_permission(actor, PermissionId::ManageUsers)
}

/// Guard a hard user delete. Self-deletion is rejected for every actor,
/// including holders of `system_admin`.
pub fn ensure_user_delete(actor: &Actor, target_id: DbId) -> Result<(), AccessError> {
    if target_id == actor.id {
        return Err(AccessError::SelfDeletion);
    }
    ensure_permission(actor, PermissionId::DeleteUsers)
}

/// Guard a bulk action. A batch containing the actor's own id is rejected
/// wholesale before any target is touched.
pub fn ensure_bulk_action(
    actor: &Actor,
    targets: &[DbId],
    action: BulkAction,
) -> Result<(), AccessError> {
    if targets.contains(&actor.id) {
        return Err(AccessError::SelfTarget);
    }
    ensure_permission(actor, action.required_permission())
}

/// Guard role creation and update.
pub fn ensure_role_manage(actor: &Actor) -> Result<(), AccessError> {
    ensure_permission(actor, PermissionId::ManageRoles)
}

/// Guard role deletion: requires `manage_roles`, rejects system roles, and
/// rejects roles still referenced by `assigned_users` profiles.
pub fn ensure_role_delete(
    actor: &Actor,
    role_name: &str,
    is_system_role: bool,
    assigned_users: i64,
) -> Result<(), AccessError> {
    ensure_permission(actor, PermissionId::ManageRoles)?;
    if is_system_role {
        return Err(AccessError::SystemRole);
    }
    if assigned_users > 0 {
        return Err(AccessError::RoleInUse {
            name: role_name.to_string(),
            assigned: assigned_users,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn actor(id: DbId, role: &str, perms: &[PermissionId]) -> Actor {
        Actor::new(id, role, perms.iter().copied().collect())
    }

    fn admin(id: DbId) -> Actor {
        actor(id, "admin", &[PermissionId::SystemAdmin])
    }

    #[test]
    fn admin_cannot_demote_self() {
        let a = admin(1);
        assert_matches!(
            ensure_role_change(&a, 1, "moderator"),
            Err(AccessError::SelfDemotion)
        );
    }

    #[test]
    fn admin_may_reassign_self_to_admin() {
        let a = admin(1);
        assert!(ensure_role_change(&a, 1, "admin").is_ok());
    }

    #[test]
    fn role_change_on_others_requires_manage_users() {
        let a = admin(1);
        assert!(ensure_role_change(&a, 2, "moderator").is_ok());

        let limited = actor(1, "editor", &[PermissionId::ViewUsers]);
        assert_matches!(
            ensure_role_change(&limited, 2, "moderator"),
            Err(AccessError::PermissionDenied(PermissionId::ManageUsers))
        );
    }

    #[test]
    fn non_admin_may_change_own_role_with_manage_users() {
        // The demotion guard protects admins locking themselves out; a
        // non-admin with manage_users is not demoting anything.
        let a = actor(1, "editor", &[PermissionId::ManageUsers]);
        assert!(ensure_role_change(&a, 1, "moderator").is_ok());
    }

    #[test]
    fn self_deletion_always_rejected() {
        // Including for system_admin holders.
        let a = admin(1);
        assert_matches!(ensure_user_delete(&a, 1), Err(AccessError::SelfDeletion));

        let plain = actor(2, "user", &[]);
        assert_matches!(ensure_user_delete(&plain, 2), Err(AccessError::SelfDeletion));
    }

    #[test]
    fn user_delete_requires_delete_users() {
        let a = actor(1, "editor", &[PermissionId::ManageUsers]);
        assert_matches!(
            ensure_user_delete(&a, 2),
            Err(AccessError::PermissionDenied(PermissionId::DeleteUsers))
        );

        let b = actor(1, "editor", &[PermissionId::DeleteUsers]);
        assert!(ensure_user_delete(&b, 2).is_ok());
    }

    #[test]
    fn bulk_action_containing_self_is_rejected_wholesale() {
        let a = admin(1);
        assert_matches!(
            ensure_bulk_action(&a, &[1, 2], BulkAction::Deactivate),
            Err(AccessError::SelfTarget)
        );
    }

    #[test]
    fn bulk_permissions_per_action() {
        let mgr = actor(1, "editor", &[PermissionId::ManageUsers]);
        assert!(ensure_bulk_action(&mgr, &[2, 3], BulkAction::Activate).is_ok());
        assert!(ensure_bulk_action(&mgr, &[2, 3], BulkAction::Deactivate).is_ok());
        assert_matches!(
            ensure_bulk_action(&mgr, &[2, 3], BulkAction::Delete),
            Err(AccessError::PermissionDenied(PermissionId::DeleteUsers))
        );
    }

    #[test]
    fn system_roles_cannot_be_deleted() {
        let a = admin(1);
        assert_matches!(
            ensure_role_delete(&a, "admin", true, 0),
            Err(AccessError::SystemRole)
        );
    }

    #[test]
    fn referenced_roles_cannot_be_deleted() {
        let a = admin(1);
        assert_matches!(
            ensure_role_delete(&a, "editor", false, 3),
            Err(AccessError::RoleInUse { assigned: 3, .. })
        );
        assert!(ensure_role_delete(&a, "editor", false, 0).is_ok());
    }

    #[test]
    fn role_management_requires_manage_roles() {
        let a = actor(1, "editor", &[PermissionId::ManageUsers]);
        assert_matches!(
            ensure_role_manage(&a),
            Err(AccessError::PermissionDenied(PermissionId::ManageRoles))
        );
    }
}
