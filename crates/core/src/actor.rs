//! The acting user's resolved identity snapshot.

use crate::permissions::{grants, PermissionId, PermissionSet};
use crate::roles::{ROLE_ADMIN, ROLE_MODERATOR};
use crate::types::DbId;

/// Snapshot of the authenticated user's id and resolved role, read by every
/// authorization check.
///
/// Built once per request from the cached profile/role pair and refreshed
/// wholesale on mutation, never patched field-by-field. An actor whose role
/// could not be resolved carries an empty permission set, so every check
/// fails closed rather than erroring.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: DbId,
    pub role_name: String,
    pub permissions: PermissionSet,
}

impl Actor {
    pub fn new(id: DbId, role_name: impl Into<String>, permissions: PermissionSet) -> Self {
        Actor {
            id,
            role_name: role_name.into(),
            permissions,
        }
    }

    /// An actor with no resolved role: denied everything.
    pub fn unresolved(id: DbId, role_name: impl Into<String>) -> Self {
        Actor::new(id, role_name, PermissionSet::new())
    }

    pub fn has_permission(&self, permission: PermissionId) -> bool {
        grants(&self.permissions, permission)
    }

    /// The single source of truth for "is this user an admin" — consumers
    /// must call this rather than re-deriving the condition.
    pub fn is_admin(&self) -> bool {
        self.role_name == ROLE_ADMIN || self.permissions.contains(&PermissionId::SystemAdmin)
    }

    pub fn is_moderator(&self) -> bool {
        self.role_name == ROLE_MODERATOR || self.has_permission(PermissionId::ModerateComments)
    }
}
