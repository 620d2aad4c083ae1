//! Vote (star rating) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wallhub_core::types::{DbId, Timestamp};

/// A vote row from the `votes` table: one 1-5 star rating per
/// `(wallpaper, user)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub wallpaper_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for casting a vote.
#[derive(Debug, Deserialize)]
pub struct CreateVote {
    pub rating: i16,
}

/// Aggregate rating for a wallpaper: vote count and arithmetic mean.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VoteSummary {
    pub votes: i64,
    /// `None` while the wallpaper has no votes.
    pub rating: Option<f64>,
}
