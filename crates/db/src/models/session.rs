//! Refresh session model and DTOs.

use sqlx::FromRow;
use wallhub_core::types::{DbId, Timestamp};

/// A session row from the `user_sessions` table. Only the SHA-256 hash of
/// the refresh token is stored; the plaintext never touches the database.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
