//! Aggregate queries for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardSummary;

/// Provides read-only dashboard aggregates.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Entity counts across the site, in one round-trip.
    pub async fn summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
        sqlx::query_as::<_, DashboardSummary>(
            "SELECT
                (SELECT COUNT(*) FROM user_profiles) AS users,
                (SELECT COUNT(*) FROM wallpapers) AS wallpapers,
                (SELECT COUNT(*) FROM wallpapers WHERE approved = FALSE) AS pending_approval,
                (SELECT COALESCE(SUM(downloads_count), 0) FROM wallpapers)::bigint AS downloads,
                (SELECT COUNT(*) FROM comments) AS comments,
                (SELECT COUNT(*) FROM votes) AS votes",
        )
        .fetch_one(pool)
        .await
    }
}
