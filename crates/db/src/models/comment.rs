//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wallhub_core::types::{DbId, Timestamp};

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub wallpaper_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub body: String,
}
