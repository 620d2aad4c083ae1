//! Repository for the `roles` table.

use sqlx::types::Json;
use sqlx::PgPool;
use wallhub_core::types::DbId;

use crate::models::role::{CreateRole, Role, UpdateRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, display_name, description, permissions, color, \
                        priority, is_system_role, created_at, updated_at";

/// Provides CRUD operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role, returning the created row. API-created roles are
    /// never system roles.
    pub async fn create(pool: &PgPool, input: &CreateRole) -> Result<Role, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (name, display_name, description, permissions, color, priority)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(&input.name)
            .bind(&input.display_name)
            .bind(&input.description)
            .bind(Json(&input.permissions))
            .bind(&input.color)
            .bind(input.priority)
            .fetch_one(pool)
            .await
    }

    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles, highest priority first, ties broken by name ascending
    /// for deterministic ordering.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY priority DESC, name ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Update a role. Only non-`None` fields in `input` are applied; `name`
    /// is immutable because profiles reference roles by name.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        let query = format!(
            "UPDATE roles SET
                display_name = COALESCE($2, display_name),
                description = COALESCE($3, description),
                permissions = COALESCE($4, permissions),
                color = COALESCE($5, color),
                priority = COALESCE($6, priority)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.description)
            .bind(input.permissions.as_ref().map(Json))
            .bind(&input.color)
            .bind(input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Delete a role. Returns `true` if the row was removed. The system-role
    /// and in-use guards run in the handler before this is called.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
