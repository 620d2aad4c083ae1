//! Onboarding step log entity model.

use serde::Serialize;
use sqlx::FromRow;
use wallhub_core::types::{DbId, Timestamp};

/// A row from the `user_onboarding` table: one record per `(user, step)`,
/// upserted on re-submission rather than duplicated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub step_name: String,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    /// Raw step payload as submitted; replayed in flow order on completion.
    pub data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
