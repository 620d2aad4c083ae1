//! Repository for the `comments` table.

use sqlx::PgPool;
use wallhub_core::types::DbId;

use crate::models::comment::Comment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, wallpaper_id, user_id, body, created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        wallpaper_id: DbId,
        user_id: DbId,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (wallpaper_id, user_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(wallpaper_id)
            .bind(user_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a wallpaper's comments, newest first.
    pub async fn list_for_wallpaper(
        pool: &PgPool,
        wallpaper_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE wallpaper_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(wallpaper_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment. Returns `true` if the row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
