//! Repository for the `user_profiles` table.

use sqlx::types::Json;
use sqlx::PgPool;
use wallhub_core::onboarding::OnboardingForm;
use wallhub_core::types::DbId;

use crate::models::profile::{
    CreateProfile, ProfileFilter, UpdateProfile, UserProfile, UserStatus,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, full_name, bio, website, avatar_url, \
                        role_name, status, onboarding_completed, favorite_categories, \
                        preferences, uploads_count, downloads_count, votes_count, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row. New profiles start
    /// with status `pending` and `onboarding_completed = false`.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (email, password_hash, full_name, avatar_url, role_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.avatar_url)
            .bind(&input.role_name)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE email = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, most recently created first, applying the optional
    /// search/role/status filters.
    pub async fn list(
        pool: &PgPool,
        filter: &ProfileFilter,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        let mut where_clauses: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.search.is_some() {
            where_clauses.push(format!(
                "(full_name ILIKE ${param_idx} OR email ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }
        if filter.role_name.is_some() {
            where_clauses.push(format!("role_name = ${param_idx}"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            where_clauses.push(format!("status = ${param_idx}"));
            let _ = param_idx;
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };
        let query = format!(
            "SELECT {COLUMNS} FROM user_profiles {where_sql} ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, UserProfile>(&query);
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{search}%"));
        }
        if let Some(ref role_name) = filter.role_name {
            q = q.bind(role_name);
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }

        q.fetch_all(pool).await
    }

    /// Self-service partial update. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_own(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                full_name = COALESCE($2, full_name),
                bio = COALESCE($3, bio),
                website = COALESCE($4, website),
                avatar_url = COALESCE($5, avatar_url),
                favorite_categories = COALESCE($6, favorite_categories),
                preferences = COALESCE($7, preferences)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.bio)
            .bind(&input.website)
            .bind(&input.avatar_url)
            .bind(input.favorite_categories.as_ref().map(Json))
            .bind(input.preferences.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Assign a new role. Returns `None` if no row with the given `id` exists.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role_name: &str,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query =
            format!("UPDATE user_profiles SET role_name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(role_name)
            .fetch_optional(pool)
            .await
    }

    /// Set the account status. Returns `true` if the row was updated.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: UserStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE user_profiles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a profile. Returns `true` if the row was removed.
    /// Sessions, onboarding records, comments, votes, and notifications
    /// cascade; uploaded wallpapers keep their rows with a cleared uploader.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count profiles currently assigned to a role, for the role-in-use
    /// deletion guard.
    pub async fn count_by_role(pool: &PgPool, role_name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles WHERE role_name = $1")
            .bind(role_name)
            .fetch_one(pool)
            .await
    }

    /// Persist the accumulated onboarding form and flip
    /// `onboarding_completed`. The flag is never reset by this layer.
    pub async fn complete_onboarding(
        pool: &PgPool,
        id: DbId,
        form: &OnboardingForm,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET
                full_name = COALESCE($2, full_name),
                bio = COALESCE($3, bio),
                website = COALESCE($4, website),
                avatar_url = COALESCE($5, avatar_url),
                favorite_categories = $6,
                preferences = $7,
                onboarding_completed = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .bind(&form.full_name)
            .bind(&form.bio)
            .bind(&form.website)
            .bind(&form.avatar_url)
            .bind(Json(&form.favorite_categories))
            .bind(Json(&form.preferences))
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_profiles SET failed_login_count = failed_login_count + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Lock an account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: wallhub_core::types::Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_profiles SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset the failure counter, clear any lock,
    /// stamp `last_login_at`, and promote `pending` accounts to `active`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_profiles SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW(),
                status = CASE WHEN status = 'pending' THEN 'active'::user_status ELSE status END
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update a profile's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE user_profiles SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the uploads counter.
    pub async fn increment_uploads(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_profiles SET uploads_count = uploads_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Bump the downloads counter.
    pub async fn increment_downloads(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_profiles SET downloads_count = downloads_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Bump the votes counter.
    pub async fn increment_votes(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_profiles SET votes_count = votes_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
