//! Admin dashboard summary model.

use serde::Serialize;
use sqlx::FromRow;

/// Entity counts surfaced on the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardSummary {
    pub users: i64,
    pub wallpapers: i64,
    pub pending_approval: i64,
    pub downloads: i64,
    pub comments: i64,
    pub votes: i64,
}
