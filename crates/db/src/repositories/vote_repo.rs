//! Repository for the `votes` table.

use sqlx::PgPool;
use wallhub_core::types::DbId;

use crate::models::vote::{Vote, VoteSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, wallpaper_id, user_id, rating, created_at, updated_at";

/// Provides operations for wallpaper star ratings.
pub struct VoteRepo;

impl VoteRepo {
    /// Insert a vote, returning the created row.
    ///
    /// The `(wallpaper_id, user_id)` unique constraint rejects a second vote
    /// from the same user; the caller surfaces that as a conflict.
    pub async fn create(
        pool: &PgPool,
        wallpaper_id: DbId,
        user_id: DbId,
        rating: i16,
    ) -> Result<Vote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (wallpaper_id, user_id, rating)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(wallpaper_id)
            .bind(user_id)
            .bind(rating)
            .fetch_one(pool)
            .await
    }

    /// Find a user's vote on a wallpaper, if any.
    pub async fn find_by_user_and_wallpaper(
        pool: &PgPool,
        wallpaper_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM votes WHERE wallpaper_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(wallpaper_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Vote count and arithmetic-mean rating for a wallpaper.
    pub async fn summary(pool: &PgPool, wallpaper_id: DbId) -> Result<VoteSummary, sqlx::Error> {
        sqlx::query_as::<_, VoteSummary>(
            "SELECT COUNT(*) AS votes, AVG(rating)::float8 AS rating
             FROM votes WHERE wallpaper_id = $1",
        )
        .bind(wallpaper_id)
        .fetch_one(pool)
        .await
    }
}
