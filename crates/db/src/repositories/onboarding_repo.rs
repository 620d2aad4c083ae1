//! Repository for the `user_onboarding` step log.

use sqlx::PgPool;
use wallhub_core::types::DbId;

use crate::models::onboarding::OnboardingRecord;

/// Column list for `user_onboarding` queries.
const COLUMNS: &str =
    "id, user_id, step_name, completed, completed_at, data, created_at, updated_at";

/// Provides the per-`(user, step)` upsert log for the onboarding flow.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Record a completed step. Re-submitting the same step overwrites its
    /// record rather than duplicating it (upsert keyed on
    /// `(user_id, step_name)`), so the log stays one row per step.
    pub async fn upsert_step(
        pool: &PgPool,
        user_id: DbId,
        step_name: &str,
        data: &serde_json::Value,
    ) -> Result<OnboardingRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_onboarding (user_id, step_name, completed, completed_at, data)
             VALUES ($1, $2, TRUE, NOW(), $3)
             ON CONFLICT (user_id, step_name) DO UPDATE SET
                completed = TRUE,
                completed_at = NOW(),
                data = EXCLUDED.data
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OnboardingRecord>(&query)
            .bind(user_id)
            .bind(step_name)
            .bind(data)
            .fetch_one(pool)
            .await
    }

    /// List a user's step records in flow order (creation order matches the
    /// linear flow; ties are impossible given the unique key).
    pub async fn list_steps(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<OnboardingRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_onboarding WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, OnboardingRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
