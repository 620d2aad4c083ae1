//! Role entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use wallhub_core::permissions::PermissionSet;
use wallhub_core::types::{DbId, Timestamp};

/// A role row from the `roles` table.
///
/// `name` is the stable key referenced by `user_profiles.role_name`;
/// `priority` orders listings (descending, ties broken by name).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub permissions: Json<PermissionSet>,
    pub color: String,
    pub priority: i32,
    pub is_system_role: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new role. `is_system_role` is not settable over the
/// API; system roles exist only as seed data.
#[derive(Debug, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub permissions: PermissionSet,
    pub color: String,
    pub priority: i32,
}

/// DTO for updating an existing role. All fields are optional; `name` is
/// immutable because profiles reference roles by name.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRole {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<PermissionSet>,
    pub color: Option<String>,
    pub priority: Option<i32>,
}
