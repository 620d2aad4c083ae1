//! Repository for the `notifications` table.

use sqlx::PgPool;
use wallhub_core::types::DbId;

use crate::models::notification::{Notification, NotificationKind};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, kind, message, is_read, read_at, created_at, updated_at";

/// Default page size for notification listings.
const DEFAULT_LIMIT: i64 = 50;

/// Provides operations for per-user notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        kind: NotificationKind,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(kind)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let read_filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1 {read_filter}
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 200))
            .bind(offset.unwrap_or(0).max(0))
            .fetch_all(pool)
            .await
    }

    /// Count a user's unread notifications.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Mark one of the user's notifications read. Returns `true` if the row
    /// was updated.
    pub async fn mark_read(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true, read_at = NOW()
             WHERE id = $1 AND user_id = $2 AND is_read = false",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of the user's notifications read. Returns the updated count.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true, read_at = NOW()
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
