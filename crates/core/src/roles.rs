//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_roles_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_USER: &str = "user";

/// Baseline non-privileged role assigned to every new profile at signup.
pub const DEFAULT_ROLE: &str = ROLE_USER;
