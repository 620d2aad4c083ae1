//! Permission catalog and set resolution.
//!
//! The catalog is a closed enum: a permission id outside it fails to
//! deserialize, so a role payload carrying an unknown id is rejected at the
//! API boundary instead of silently granting nothing.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An atomic capability gating one admin action or view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionId {
    ViewDashboard,
    ManageWallpapers,
    UploadWallpapers,
    DeleteWallpapers,
    ApproveWallpapers,
    ManageUsers,
    ViewUsers,
    DeleteUsers,
    ManageComments,
    ModerateComments,
    ViewAnalytics,
    ManageSettings,
    ManageRoles,
    /// Super-permission: satisfies every permission check.
    SystemAdmin,
}

impl PermissionId {
    /// The full catalog, in display order.
    pub const ALL: [PermissionId; 14] = [
        PermissionId::ViewDashboard,
        PermissionId::ManageWallpapers,
        PermissionId::UploadWallpapers,
        PermissionId::DeleteWallpapers,
        PermissionId::ApproveWallpapers,
        PermissionId::ManageUsers,
        PermissionId::ViewUsers,
        PermissionId::DeleteUsers,
        PermissionId::ManageComments,
        PermissionId::ModerateComments,
        PermissionId::ViewAnalytics,
        PermissionId::ManageSettings,
        PermissionId::ManageRoles,
        PermissionId::SystemAdmin,
    ];

    /// The wire/storage id (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionId::ViewDashboard => "view_dashboard",
            PermissionId::ManageWallpapers => "manage_wallpapers",
            PermissionId::UploadWallpapers => "upload_wallpapers",
            PermissionId::DeleteWallpapers => "delete_wallpapers",
            PermissionId::ApproveWallpapers => "approve_wallpapers",
            PermissionId::ManageUsers => "manage_users",
            PermissionId::ViewUsers => "view_users",
            PermissionId::DeleteUsers => "delete_users",
            PermissionId::ManageComments => "manage_comments",
            PermissionId::ModerateComments => "moderate_comments",
            PermissionId::ViewAnalytics => "view_analytics",
            PermissionId::ManageSettings => "manage_settings",
            PermissionId::ManageRoles => "manage_roles",
            PermissionId::SystemAdmin => "system_admin",
        }
    }

    /// Display category used to group the catalog in the role editor.
    pub fn category(self) -> &'static str {
        match self {
            PermissionId::ViewDashboard => "Dashboard",
            PermissionId::ManageWallpapers
            | PermissionId::UploadWallpapers
            | PermissionId::DeleteWallpapers
            | PermissionId::ApproveWallpapers
            | PermissionId::ManageComments
            | PermissionId::ModerateComments => "Content",
            PermissionId::ManageUsers | PermissionId::ViewUsers | PermissionId::DeleteUsers => {
                "Users"
            }
            PermissionId::ViewAnalytics => "Analytics",
            PermissionId::ManageSettings => "Settings",
            PermissionId::ManageRoles | PermissionId::SystemAdmin => "System",
        }
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The permission grant set attached to a role.
pub type PermissionSet = BTreeSet<PermissionId>;

/// True iff `permissions` grants `permission`, either directly or through
/// the `system_admin` super-permission. An empty set denies everything.
pub fn grants(permissions: &PermissionSet, permission: PermissionId) -> bool {
    permissions.contains(&permission) || permissions.contains(&PermissionId::SystemAdmin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(perms: &[PermissionId]) -> PermissionSet {
        perms.iter().copied().collect()
    }

    #[test]
    fn direct_grant_resolves() {
        let perms = set(&[PermissionId::ManageWallpapers]);
        assert!(grants(&perms, PermissionId::ManageWallpapers));
        assert!(!grants(&perms, PermissionId::DeleteUsers));
    }

    #[test]
    fn system_admin_grants_everything() {
        let perms = set(&[PermissionId::SystemAdmin]);
        for p in PermissionId::ALL {
            assert!(grants(&perms, p), "system_admin should grant '{p}'");
        }
    }

    #[test]
    fn empty_set_denies_everything() {
        let perms = PermissionSet::new();
        for p in PermissionId::ALL {
            assert!(!grants(&perms, p), "empty set should deny '{p}'");
        }
    }

    #[test]
    fn serde_uses_snake_case_ids() {
        let json = serde_json::to_string(&PermissionId::SystemAdmin).unwrap();
        assert_eq!(json, "\"system_admin\"");

        let parsed: PermissionId = serde_json::from_str("\"moderate_comments\"").unwrap();
        assert_eq!(parsed, PermissionId::ModerateComments);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let result = serde_json::from_str::<PermissionId>("\"launch_missiles\"");
        assert!(result.is_err(), "unknown permission ids must not parse");
    }

    #[test]
    fn as_str_matches_serde_representation() {
        for p in PermissionId::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
    }

    #[test]
    fn every_permission_has_a_category() {
        for p in PermissionId::ALL {
            assert!(!p.category().is_empty());
        }
    }
}
