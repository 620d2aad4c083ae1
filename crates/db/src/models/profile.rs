//! User profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use wallhub_core::onboarding::Preferences;
use wallhub_core::types::{DbId, Timestamp};

/// Account standing of a profile.
///
/// `pending` is the state between signup and first successful login;
/// `inactive` and `suspended` both block authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

/// Full profile row from the `user_profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    /// Name of the assigned role (FK to `roles.name`).
    pub role_name: String,
    pub status: UserStatus,
    pub onboarding_completed: bool,
    pub favorite_categories: Json<Vec<String>>,
    pub preferences: Json<Preferences>,
    pub uploads_count: i32,
    pub downloads_count: i32,
    pub votes_count: i32,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub role_name: String,
    pub status: UserStatus,
    pub onboarding_completed: bool,
    pub favorite_categories: Vec<String>,
    pub preferences: Preferences,
    pub uploads_count: i32,
    pub downloads_count: i32,
    pub votes_count: i32,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<UserProfile> for ProfileResponse {
    fn from(p: UserProfile) -> Self {
        ProfileResponse {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            bio: p.bio,
            website: p.website,
            avatar_url: p.avatar_url,
            role_name: p.role_name,
            status: p.status,
            onboarding_completed: p.onboarding_completed,
            favorite_categories: p.favorite_categories.0,
            preferences: p.preferences.0,
            uploads_count: p.uploads_count,
            downloads_count: p.downloads_count,
            votes_count: p.votes_count,
            last_login_at: p.last_login_at,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new profile at signup.
#[derive(Debug)]
pub struct CreateProfile {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    /// Baseline role name; callers pass [`wallhub_core::roles::DEFAULT_ROLE`].
    pub role_name: String,
}

/// DTO for self-service profile updates. All fields are optional; role and
/// status are deliberately absent -- those move only through the admin
/// surface.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<String>,
    pub favorite_categories: Option<Vec<String>>,
    pub preferences: Option<Preferences>,
}

/// Admin listing filter. `search` is a case-insensitive substring match over
/// full name and email.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFilter {
    pub search: Option<String>,
    pub role_name: Option<String>,
    pub status: Option<UserStatus>,
}
